//! Long-running loops.

pub mod guild_loop;
