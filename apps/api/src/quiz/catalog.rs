//! Curated replacement questions for placeholder bank entries.

use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;

/// Marker text carried by placeholder questions in the bank.
pub const PLACEHOLDER_MARKER: &str = "Explain a key concept or solve a coding/logical scenario";

static QUESTION_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Q\d+ for [^:]+: ").expect("question label pattern is valid"));

const PYTHON: &[&str] = &[
    "What is the output of the following Python code: print(2 ** 3 ** 2)?",
    "Which of the following is NOT a valid way to create a dictionary in Python?",
    "What is the time complexity of binary search in a sorted list?",
    "In Python, what does the 'global' keyword do?",
    "What is the difference between '==' and 'is' operators in Python?",
    "What will be the output of: x = [1, 2, 3]; y = x; y.append(4); print(len(x))?",
    "Which of the following is true about Python's garbage collection?",
    "What is the purpose of the __init__ method in a Python class?",
    "Which of the following is NOT a valid file opening mode in Python?",
    "What is the output of: print(type(lambda: None))?",
];

const C_PROGRAMMING: &[&str] = &[
    "What is the output of the following C code: int x=5; printf('%d %d %d', x++, ++x, x--);?",
    "Which of the following is true about static variables in C?",
    "What is the purpose of the 'const' keyword in C?",
    "In C, what is the difference between 'malloc' and 'calloc'?",
    "What will be the output of: int a[5] = {1,2,3,4,5}; printf('%d', *(a+2));?",
    "Which of the following is true about pointers in C?",
    "What is the size of a pointer variable in a 64-bit system?",
    "Which of the following is NOT a valid storage class in C?",
    "What is the output of: int x = 10; printf('%d %d %d', x, ++x, x++);?",
    "What is the purpose of the 'extern' keyword in C?",
];

const JAVA: &[&str] = &[
    "What is the output of the following Java code involving inheritance?",
    "Which of the following is true about Java interfaces?",
    "What is the purpose of the 'finally' block in Java exception handling?",
    "In Java, what is the difference between '==' and '.equals()' methods?",
    "What is the time complexity of HashMap operations in Java?",
    "Which of the following is true about Java's garbage collection?",
    "What is the purpose of the 'static' keyword in Java?",
    "Which of the following is NOT a valid access modifier in Java?",
    "What is the output of: String s1 = 'Hello'; String s2 = 'Hello'; System.out.println(s1 == s2);?",
    "What is the purpose of the 'super' keyword in Java?",
];

const DSA: &[&str] = &[
    "What is the time complexity of insertion in a balanced binary search tree?",
    "Which data structure is most appropriate for implementing BFS?",
    "What is the space complexity of merge sort algorithm?",
    "In a hash table, what is collision and how is it handled?",
    "What is the difference between stack and queue data structures?",
    "Which sorting algorithm has the best average-case time complexity?",
    "What is the time complexity of Dijkstra's algorithm using a binary heap?",
    "Which data structure is used to implement recursion?",
    "What is the worst-case time complexity of quicksort?",
    "Which traversal method is used for level-order traversal of a tree?",
];

const SQL_DBMS: &[&str] = &[
    "What is the difference between INNER JOIN and LEFT JOIN in SQL?",
    "Which normal form eliminates transitive dependency?",
    "What is the purpose of indexing in a database?",
    "What is the ACID property in database transactions?",
    "How would you optimize a slow-running SQL query?",
    "What is the difference between DELETE and TRUNCATE commands?",
    "Which of the following is true about primary keys?",
    "What is the purpose of a foreign key constraint?",
    "What is the difference between CHAR and VARCHAR data types?",
    "Which SQL command is used to retrieve data from a database?",
];

const MACHINE_LEARNING: &[&str] = &[
    "What is the difference between supervised and unsupervised learning?",
    "What is overfitting and how can it be prevented?",
    "Explain the bias-variance tradeoff in machine learning.",
    "What is the purpose of cross-validation in model evaluation?",
    "What is the difference between precision and recall metrics?",
    "Which algorithm is best suited for linearly separable data?",
    "What is the purpose of regularization in machine learning?",
    "What is the difference between bagging and boosting?",
    "Which metric is most appropriate for imbalanced datasets?",
    "What is the purpose of feature scaling in machine learning?",
];

const OPERATING_SYSTEM: &[&str] = &[
    "What is the difference between process and thread?",
    "Explain the concept of virtual memory in operating systems.",
    "What is a deadlock and what are the necessary conditions for it to occur?",
    "What is the purpose of a page table in memory management?",
    "What is the difference between preemptive and non-preemptive scheduling?",
    "What is the purpose of semaphores in process synchronization?",
    "What is the difference between paging and segmentation?",
    "What is thrashing in the context of virtual memory?",
    "What is the purpose of the kernel in an operating system?",
    "What is the difference between multitasking and multiprocessing?",
];

const WEB_DEVELOPMENT: &[&str] = &[
    "What is the difference between 'let', 'const', and 'var' in JavaScript?",
    "Explain the CSS box model and its components.",
    "What is the virtual DOM in React and how does it improve performance?",
    "What is the purpose of useEffect hook in React?",
    "What is the difference between session storage and local storage?",
    "What is the purpose of CSS flexbox?",
    "What is event bubbling in JavaScript?",
    "What is the difference between == and === in JavaScript?",
    "What is the purpose of React components?",
    "What is the CSS property used to make an element transparent?",
];

/// Hand-written questions for the built-in skills.
pub fn curated_questions(skill: &str) -> Option<&'static [&'static str]> {
    match skill {
        "Python" => Some(PYTHON),
        "C Programming" => Some(C_PROGRAMMING),
        "Java" => Some(JAVA),
        "Data Structures & Algorithms" => Some(DSA),
        "SQL + DBMS" => Some(SQL_DBMS),
        "Machine Learning" => Some(MACHINE_LEARNING),
        "Operating System" => Some(OPERATING_SYSTEM),
        "Web Development (HTML/CSS/JS + Basics React)" => Some(WEB_DEVELOPMENT),
        _ => None,
    }
}

/// Removes a leading "Q7 for Python: " style label.
pub fn strip_label(text: &str) -> &str {
    match QUESTION_LABEL.find(text) {
        Some(m) if m.start() == 0 => &text[m.end()..],
        _ => text,
    }
}

pub fn is_placeholder(text: &str) -> bool {
    strip_label(text).contains(PLACEHOLDER_MARKER)
}

/// A curated question for `skill`, preferring ones not in `already_used`.
/// Unknown skills get the generic scenario prompt.
pub fn better_question<R: Rng + ?Sized>(skill: &str, already_used: &[String], rng: &mut R) -> String {
    let Some(pool) = curated_questions(skill) else {
        return format!("{PLACEHOLDER_MARKER} related to {skill}.");
    };

    let fresh: Vec<&str> = pool
        .iter()
        .copied()
        .filter(|q| !already_used.iter().any(|used| used == q))
        .collect();

    let chosen = if fresh.is_empty() {
        pool.choose(rng)
    } else {
        fresh.choose(rng)
    };
    chosen.map(|q| q.to_string()).unwrap_or_default()
}
