//! Option table: maps question text to one of four canned answer sets per skill.
//!
//! Rules are checked in order against the lowercased question; the first rule
//! whose substrings all occur (and, when `any_of` is non-empty, at least one
//! of those) wins. The first option of every set is the intended answer.

use crate::quiz::catalog::strip_label;

pub type OptionSet = [&'static str; 4];

struct Rule {
    all_of: &'static [&'static str],
    any_of: &'static [&'static str],
    options: OptionSet,
}

impl Rule {
    fn matches(&self, text: &str) -> bool {
        self.all_of.iter().all(|needle| text.contains(needle))
            && (self.any_of.is_empty() || self.any_of.iter().any(|needle| text.contains(needle)))
    }
}

struct SkillRules {
    rules: &'static [Rule],
    fallback: OptionSet,
}

const fn rule(all_of: &'static [&'static str], options: OptionSet) -> Rule {
    Rule {
        all_of,
        any_of: &[],
        options,
    }
}

pub const UNKNOWN_SKILL_OPTIONS: OptionSet = [
    "Option A - Correct approach",
    "Option B - Contains errors",
    "Option C - Inefficient solution",
    "Option D - Not applicable",
];

static PYTHON: SkillRules = SkillRules {
    rules: &[
        rule(
            &["output", "print"],
            [
                "64 (exponentiation is right-associative)",
                "512 (exponentiation is left-associative)",
                "18 (multiplication is performed first)",
                "Syntax Error",
            ],
        ),
        rule(
            &["dictionary"],
            [
                "dict = {'a': 1, 'b': 2}",
                "{'a': 1, 'b': 2}",
                "dict('a' => 1, 'b' => 2)",
                "dict(a=1, b=2)",
            ],
        ),
        rule(&["time complexity", "binary search"], ["O(log n)", "O(n)", "O(n log n)", "O(1)"]),
        rule(
            &["global"],
            [
                "It allows modification of a global variable inside a function",
                "It creates a new local variable with the same name",
                "It deletes the global variable",
                "It has no effect on variable scope",
            ],
        ),
        rule(
            &["==", "is"],
            [
                "'==' compares values, 'is' compares object identity",
                "Both compare values but 'is' is faster",
                "Both compare object identity but '==' is faster",
                "'is' compares values, '==' compares object identity",
            ],
        ),
        rule(&["append"], ["4", "3", "5", "Error: append() returns None"]),
        rule(
            &["garbage", "collection"],
            [
                "Python uses reference counting and cyclic garbage collection",
                "Python doesn't have garbage collection",
                "Python only uses reference counting",
                "Python only uses cyclic garbage collection",
            ],
        ),
        rule(
            &["__init__"],
            [
                "To initialize the object's attributes when it's created",
                "To destroy the object when it's no longer needed",
                "To make the class inheritable",
                "To define static methods",
            ],
        ),
        rule(
            &["file opening mode"],
            [
                "'x' (exclusive creation)",
                "'r+' (read and write)",
                "'w+' (write and read)",
                "'a+' (append and read)",
            ],
        ),
        rule(
            &["type", "lambda"],
            [
                "<class 'function'>",
                "<class 'method'>",
                "<class 'lambda'>",
                "Syntax Error",
            ],
        ),
    ],
    fallback: [
        "It defines the behavior of objects in the language",
        "It's a syntax rule with no practical impact",
        "It's only relevant for object-oriented programming",
        "It affects memory allocation but not program behavior",
    ],
};

static C_PROGRAMMING: SkillRules = SkillRules {
    rules: &[
        Rule {
            all_of: &["output"],
            any_of: &["printf", "x++"],
            options: ["5 7 6", "6 7 5", "5 6 7", "Compilation Error"],
        },
        rule(
            &["static"],
            [
                "Static variables retain their value between function calls",
                "Static variables are allocated on the heap",
                "Static variables are automatically initialized to zero",
                "Static variables can only be accessed within the same file",
            ],
        ),
        rule(
            &["const"],
            [
                "To declare a variable whose value cannot be changed",
                "To allocate memory in the constant pool",
                "To make a variable accessible from other files",
                "To optimize the variable for faster access",
            ],
        ),
        rule(
            &["malloc", "calloc"],
            [
                "malloc doesn't initialize memory, calloc initializes to zero",
                "malloc is faster but less secure",
                "calloc can allocate more memory than malloc",
                "There is no difference, they are synonyms",
            ],
        ),
        rule(
            &["pointer"],
            [
                "Pointers store memory addresses of variables",
                "Pointers are only used for dynamic memory allocation",
                "Pointers can only point to integer variables",
                "Pointers automatically dereference when used",
            ],
        ),
        rule(
            &["extern"],
            [
                "To declare a variable that is defined in another file",
                "To make a variable accessible from multiple functions",
                "To allocate memory for a global variable",
                "To create a copy of a variable in another file",
            ],
        ),
        rule(&["storage class"], ["mutable", "auto", "register", "extern"]),
    ],
    fallback: [
        "It's a fundamental concept that affects program execution",
        "It's a syntactic feature with minimal impact",
        "It's only relevant for advanced programming scenarios",
        "It primarily affects memory usage patterns",
    ],
};

static JAVA: SkillRules = SkillRules {
    rules: &[
        rule(
            &["inheritance"],
            [
                "The child class inherits fields and methods from the parent class",
                "The parent class inherits fields and methods from the child class",
                "Both classes share the same memory space",
                "Inheritance is not supported in Java",
            ],
        ),
        rule(
            &["interface"],
            [
                "Interfaces can contain only abstract methods and constants",
                "Interfaces can contain both abstract and concrete methods",
                "Interfaces can have instance variables",
                "Interfaces don't support multiple inheritance",
            ],
        ),
        rule(
            &["finally"],
            [
                "The finally block always executes whether an exception occurs or not",
                "The finally block only executes when an exception is caught",
                "The finally block prevents exceptions from being thrown",
                "The finally block is optional in exception handling",
            ],
        ),
        rule(
            &["==", "equals"],
            [
                "'==' compares references, equals() compares content",
                "'==' compares content, equals() compares references",
                "Both compare content but '==' is faster",
                "Both compare references but equals() is faster",
            ],
        ),
        rule(
            &["hashmap"],
            [
                "O(1) average case for get/put operations",
                "O(log n) for all operations",
                "O(n) for all operations",
                "O(1) for all operations",
            ],
        ),
        rule(
            &["garbage", "collection"],
            [
                "Java uses automatic garbage collection to reclaim memory",
                "Java requires manual memory management",
                "Java doesn't have garbage collection",
                "Java only collects memory when the program exits",
            ],
        ),
        rule(
            &["static"],
            [
                "Static members belong to the class rather than instances",
                "Static members are loaded when the class is instantiated",
                "Static members cannot be accessed directly",
                "Static members are unique for each object",
            ],
        ),
        rule(
            &["access modifier"],
            [
                "private, default, protected, public",
                "private, protected, public, global",
                "internal, external, protected, public",
                "final, abstract, static, volatile",
            ],
        ),
        rule(
            &["string", "=="],
            [
                "false because s1 and s2 refer to different objects",
                "true because s1 and s2 have the same content",
                "true because string literals are interned",
                "Compilation error due to invalid syntax",
            ],
        ),
        rule(
            &["super"],
            [
                "To access the parent class's members",
                "To call a method in the current class",
                "To create an instance of the parent class",
                "To define a superclass method",
            ],
        ),
    ],
    fallback: [
        "It's a core concept that affects object behavior",
        "It's a syntactic feature with minimal runtime impact",
        "It's only relevant for enterprise applications",
        "It primarily affects performance characteristics",
    ],
};

static DSA: SkillRules = SkillRules {
    rules: &[
        rule(
            &["balanced binary search tree", "insertion"],
            ["O(log n)", "O(n)", "O(n log n)", "O(1)"],
        ),
        rule(&["bfs"], ["Queue", "Stack", "Array", "Linked List"]),
        rule(&["merge sort", "space complexity"], ["O(n)", "O(log n)", "O(n log n)", "O(1)"]),
        rule(
            &["collision", "hash table"],
            [
                "When two keys map to the same index; handled by chaining or open addressing",
                "When the hash table becomes full; handled by resizing",
                "When two values are identical; handled by duplicate removal",
                "When the hash function fails; handled by rehashing",
            ],
        ),
        rule(
            &["stack", "queue"],
            [
                "Stack is LIFO, Queue is FIFO",
                "Stack is FIFO, Queue is LIFO",
                "Both are LIFO structures",
                "Both are FIFO structures",
            ],
        ),
        rule(
            &["sorting algorithm", "best average-case"],
            [
                "Merge Sort and Heap Sort: O(n log n)",
                "Bubble Sort: O(n)",
                "Quick Sort: O(n)",
                "Insertion Sort: O(n log n)",
            ],
        ),
        rule(&["dijkstra", "binary heap"], ["O((V + E) log V)", "O(V^2)", "O(E)", "O(V)"]),
        rule(&["recursion"], ["Stack", "Queue", "Array", "Tree"]),
        rule(&["quicksort", "worst-case"], ["O(n^2)", "O(n log n)", "O(log n)", "O(n)"]),
        rule(
            &["traversal", "level-order"],
            [
                "Breadth-First Search (BFS)",
                "Depth-First Search (DFS)",
                "In-order traversal",
                "Pre-order traversal",
            ],
        ),
    ],
    fallback: [
        "It's a fundamental concept that affects algorithm efficiency",
        "It's a theoretical concept with minimal practical impact",
        "It's only relevant for competitive programming",
        "It primarily affects memory usage rather than time complexity",
    ],
};

static SQL_DBMS: SkillRules = SkillRules {
    rules: &[
        rule(
            &["inner join", "left join"],
            [
                "INNER JOIN returns only matching rows, LEFT JOIN returns all left table rows",
                "INNER JOIN returns all rows, LEFT JOIN returns only matching rows",
                "Both return the same result set",
                "INNER JOIN is faster but less accurate",
            ],
        ),
        rule(
            &["normal form", "transitive dependency"],
            [
                "Third Normal Form (3NF)",
                "First Normal Form (1NF)",
                "Second Normal Form (2NF)",
                "Boyce-Codd Normal Form (BCNF)",
            ],
        ),
        rule(
            &["indexing"],
            [
                "To improve query performance by creating pointers to data",
                "To encrypt sensitive data for security",
                "To compress data for storage efficiency",
                "To organize data in alphabetical order",
            ],
        ),
        rule(
            &["acid"],
            [
                "Atomicity, Consistency, Isolation, Durability",
                "Access, Control, Integrity, Durability",
                "Accuracy, Consistency, Integrity, Durability",
                "Atomicity, Concurrency, Isolation, Durability",
            ],
        ),
        rule(
            &["optimize", "sql query"],
            [
                "Add indexes, rewrite queries, analyze execution plans",
                "Increase server memory, upgrade hardware",
                "Convert to stored procedures, use views",
                "Normalize the database further, reduce table size",
            ],
        ),
        rule(
            &["delete", "truncate"],
            [
                "DELETE can be rolled back, TRUNCATE cannot",
                "DELETE is faster, TRUNCATE is slower",
                "DELETE removes specific rows, TRUNCATE removes all rows",
                "Both can be rolled back",
            ],
        ),
        rule(
            &["primary key"],
            [
                "Uniquely identifies each record and cannot be NULL",
                "Can have duplicate values but cannot be NULL",
                "Uniquely identifies each record but can be NULL",
                "Is optional and mainly for documentation",
            ],
        ),
        rule(
            &["foreign key"],
            [
                "To maintain referential integrity between tables",
                "To encrypt data between tables",
                "To improve query performance",
                "To create indexes automatically",
            ],
        ),
        rule(
            &["char", "varchar"],
            [
                "CHAR is fixed-length, VARCHAR is variable-length",
                "CHAR is variable-length, VARCHAR is fixed-length",
                "Both are variable-length but CHAR is faster",
                "Both are fixed-length but VARCHAR uses less memory",
            ],
        ),
        rule(&["retrieve data"], ["SELECT", "GET", "FETCH", "QUERY"]),
    ],
    fallback: [
        "It's a critical concept for data integrity and performance",
        "It's a syntactic feature with minimal database impact",
        "It's only relevant for large-scale database systems",
        "It primarily affects storage requirements rather than access speed",
    ],
};

static MACHINE_LEARNING: SkillRules = SkillRules {
    rules: &[
        rule(
            &["supervised", "unsupervised"],
            [
                "Supervised uses labeled data, unsupervised finds patterns in unlabeled data",
                "Supervised is faster, unsupervised is more accurate",
                "Supervised uses regression, unsupervised uses classification",
                "Both require the same amount of data preprocessing",
            ],
        ),
        rule(
            &["overfitting"],
            [
                "When a model learns training data too well and performs poorly on new data",
                "When a model is too simple to capture data patterns",
                "When training data is insufficient for model learning",
                "When a model performs equally on training and test data",
            ],
        ),
        rule(
            &["bias-variance"],
            [
                "Bias is error from assumptions, variance is sensitivity to training data",
                "Bias is sensitivity to data, variance is error from assumptions",
                "Both relate to model complexity but in opposite ways",
                "Both are minimized by increasing training data size",
            ],
        ),
        rule(
            &["cross-validation"],
            [
                "To assess model performance on unseen data",
                "To speed up model training process",
                "To reduce the size of training data",
                "To eliminate outliers from the dataset",
            ],
        ),
        rule(
            &["precision", "recall"],
            [
                "Precision is true positives over predicted positives, recall is true positives over actual positives",
                "Precision is true positives over actual positives, recall is true positives over predicted positives",
                "Both measure the same aspect but with different formulas",
                "Precision is more important than recall for all applications",
            ],
        ),
        rule(
            &["linearly separable"],
            [
                "Support Vector Machine (SVM)",
                "K-Means Clustering",
                "Decision Tree",
                "Random Forest",
            ],
        ),
        rule(
            &["regularization"],
            [
                "To prevent overfitting by adding penalty terms",
                "To speed up model training by simplifying calculations",
                "To normalize input features for better convergence",
                "To increase model complexity for better accuracy",
            ],
        ),
        rule(
            &["bagging", "boosting"],
            [
                "Bagging trains models in parallel, boosting trains sequentially",
                "Bagging is for classification, boosting is for regression",
                "Bagging reduces bias, boosting reduces variance",
                "Both use the same training approach but different aggregation",
            ],
        ),
        rule(
            &["imbalanced datasets"],
            [
                "F1-Score or AUC-ROC",
                "Accuracy",
                "Mean Squared Error",
                "R-Squared",
            ],
        ),
        rule(
            &["feature scaling"],
            [
                "To normalize feature ranges for equal contribution to the model",
                "To reduce the number of features in the dataset",
                "To eliminate outliers from the feature space",
                "To convert categorical features to numerical",
            ],
        ),
    ],
    fallback: [
        "It's a fundamental technique that affects model performance",
        "It's a preprocessing step with minimal impact on results",
        "It's only relevant for deep learning applications",
        "It primarily affects training time rather than accuracy",
    ],
};

static OPERATING_SYSTEM: SkillRules = SkillRules {
    rules: &[
        rule(
            &["process", "thread"],
            [
                "Process is a program in execution, thread is a lightweight process within a process",
                "Process is single-threaded, thread is multi-threaded",
                "Process uses more memory, thread uses less CPU",
                "Both are identical but with different names",
            ],
        ),
        rule(
            &["virtual memory"],
            [
                "A memory management technique that provides an illusion of large main memory",
                "A hardware component that increases physical RAM",
                "A software tool that compresses memory usage",
                "A network protocol for remote memory access",
            ],
        ),
        rule(
            &["deadlock"],
            [
                "Mutual exclusion, hold and wait, no preemption, circular wait",
                "Race condition, starvation, livelock, priority inversion",
                "Synchronization, serialization, isolation, atomicity",
                "Blocking, sleeping, waiting, terminating",
            ],
        ),
        rule(
            &["page table"],
            [
                "To map virtual addresses to physical addresses",
                "To store frequently accessed pages for faster retrieval",
                "To organize pages in chronological order",
                "To encrypt pages for security purposes",
            ],
        ),
        rule(
            &["preemptive", "non-preemptive"],
            [
                "Preemptive can interrupt processes, non-preemptive cannot",
                "Preemptive is faster, non-preemptive is more secure",
                "Preemptive uses priority, non-preemptive uses FIFO",
                "Both provide the same level of control",
            ],
        ),
        rule(
            &["semaphore"],
            [
                "To control access to shared resources by multiple processes",
                "To encrypt communication between processes",
                "To prioritize processes in the ready queue",
                "To allocate memory dynamically to processes",
            ],
        ),
        rule(
            &["paging", "segmentation"],
            [
                "Paging divides memory into fixed-size blocks, segmentation into variable-size blocks",
                "Paging is faster, segmentation uses less memory",
                "Paging is hardware-based, segmentation is software-based",
                "Both provide the same memory organization approach",
            ],
        ),
        rule(
            &["thrashing"],
            [
                "When a system spends more time swapping pages than executing processes",
                "When CPU utilization is extremely high due to heavy processing",
                "When multiple processes compete for the same resource",
                "When memory fragmentation prevents efficient allocation",
            ],
        ),
        rule(
            &["kernel"],
            [
                "Core component that manages system resources and hardware",
                "User interface that allows interaction with the system",
                "Application layer that provides utilities and services",
                "Security module that protects system from malware",
            ],
        ),
        rule(
            &["multitasking", "multiprocessing"],
            [
                "Multitasking runs multiple tasks on a single processor, multiprocessing uses multiple processors",
                "Multitasking is software-based, multiprocessing is hardware-based",
                "Multitasking is faster, multiprocessing is more secure",
                "Both provide the same level of parallelism",
            ],
        ),
    ],
    fallback: [
        "It's a core concept that affects system performance and resource management",
        "It's a theoretical concept with minimal practical implementation",
        "It's only relevant for server operating systems",
        "It primarily affects user interface design rather than system efficiency",
    ],
};

static WEB_DEVELOPMENT: SkillRules = SkillRules {
    rules: &[
        rule(
            &["let", "const", "var"],
            [
                "let is block-scoped, const is block-scoped and read-only, var is function-scoped",
                "let is function-scoped, const is block-scoped, var is global-scoped",
                "All have the same scope but different initialization rules",
                "let and const are identical, var is deprecated",
            ],
        ),
        rule(
            &["css box model"],
            [
                "Content, padding, border, margin",
                "Header, body, footer, sidebar",
                "Width, height, depth, opacity",
                "Position, display, float, clear",
            ],
        ),
        rule(
            &["virtual dom"],
            [
                "A lightweight representation of the actual DOM for performance optimization",
                "A security feature that isolates components from the real DOM",
                "A debugging tool that visualizes component hierarchy",
                "A testing utility that simulates DOM events",
            ],
        ),
        rule(
            &["useeffect"],
            [
                "To perform side effects in functional components",
                "To manage component state in class components",
                "To handle user events like clicks and inputs",
                "To optimize rendering performance",
            ],
        ),
        rule(
            &["session storage", "local storage"],
            [
                "Session storage is cleared when the page session ends, local storage persists",
                "Session storage is faster, local storage is more secure",
                "Session storage works only with HTTP, local storage works with HTTPS",
                "Both have the same persistence but different APIs",
            ],
        ),
        rule(
            &["css flexbox"],
            [
                "To create flexible layouts with alignment and distribution of space",
                "To add animations and transitions to elements",
                "To create responsive grids with fixed dimensions",
                "To apply 3D transformations to elements",
            ],
        ),
        rule(
            &["event bubbling"],
            [
                "When an event propagates from the target element up to its ancestors",
                "When multiple events fire simultaneously on different elements",
                "When an event handler creates an infinite loop of events",
                "When event listeners are automatically removed after execution",
            ],
        ),
        rule(
            &["==", "==="],
            [
                "'==' performs type coercion, '===' compares both value and type",
                "'===' performs type coercion, '==' compares both value and type",
                "Both perform type coercion but '===' is faster",
                "Both compare value and type but '==' is more strict",
            ],
        ),
        rule(
            &["react component"],
            [
                "Reusable, independent pieces of UI that manage their own state",
                "Built-in HTML elements with enhanced functionality",
                "CSS classes that define visual styles",
                "JavaScript functions that always return HTML",
            ],
        ),
        rule(&["transparent"], ["opacity", "visibility", "display", "background"]),
    ],
    fallback: [
        "It's a key concept that affects user experience and functionality",
        "It's a syntactic feature with minimal impact on web performance",
        "It's only relevant for modern frameworks and libraries",
        "It primarily affects accessibility rather than visual design",
    ],
};

fn rules_for(skill: &str) -> Option<&'static SkillRules> {
    match skill {
        "Python" => Some(&PYTHON),
        "C Programming" => Some(&C_PROGRAMMING),
        "Java" => Some(&JAVA),
        "Data Structures & Algorithms" => Some(&DSA),
        "SQL + DBMS" => Some(&SQL_DBMS),
        "Machine Learning" => Some(&MACHINE_LEARNING),
        "Operating System" => Some(&OPERATING_SYSTEM),
        "Web Development (HTML/CSS/JS + Basics React)" => Some(&WEB_DEVELOPMENT),
        _ => None,
    }
}

/// The four answer options for `question` under `skill`.
pub fn options_for(question: &str, skill: &str) -> OptionSet {
    let Some(skill_rules) = rules_for(skill) else {
        return UNKNOWN_SKILL_OPTIONS;
    };

    let text = strip_label(question).to_lowercase();
    skill_rules
        .rules
        .iter()
        .find(|r| r.matches(&text))
        .map(|r| r.options)
        .unwrap_or(skill_rules.fallback)
}
