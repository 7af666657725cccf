//! Scheduling domain models.
//!
//! Provides the data types for representing DAG scheduling problems and
//! their solutions on a pool of identical processors.
//!
//! # Domain Mappings
//!
//! | dag-schedule | Cloud Workflow | HPC | Build System |
//! |--------------|----------------|-----|--------------|
//! | Task | Function call | Kernel | Compile unit |
//! | Edge | Data transfer | Message | Artifact dependency |
//! | Processor | VM instance | Core | Worker |
//! | Assignment | Placement | Mapping | Job plan |

mod assignment;
mod graph;
mod schedule;
mod task;

pub use assignment::Assignment;
pub use graph::TaskGraph;
pub use schedule::Timing;
pub use task::{Edge, Task};
