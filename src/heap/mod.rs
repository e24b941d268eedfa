//! Binary priority heap shared by the event queue and the cursor search.

mod core;

pub use self::core::{HeapOrder, PriorityHeap};
