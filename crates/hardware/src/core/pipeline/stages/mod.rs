//! Pipeline stage logic, one module per stage.
//!
//! Each stage is a free function over `(&mut Cpu, &mut TickState)`. A stage
//! reads the current latches and writes only the staging buffer (and, for
//! MEM and WB, the architectural memory and register file they own).

/// Instruction decode (ID).
pub mod decode;
/// Execute (EX).
pub mod execute;
/// Instruction fetch (IF).
pub mod fetch;
/// Memory access (MEM).
pub mod memory;
/// Writeback (WB).
pub mod writeback;

pub use decode::decode_stage;
pub use execute::execute_stage;
pub use fetch::fetch_stage;
pub use memory::mem_stage;
pub use writeback::wb_stage;
