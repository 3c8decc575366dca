//! Purpose-built collections backing the shortest-path search.

pub mod pqueue;
pub mod probing;

pub use pqueue::MinPQueue;
pub use probing::ProbingMap;
