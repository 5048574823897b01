pub mod classify;
pub mod cli;
pub mod commit;
pub mod conflict;
pub mod engine;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod logger;
pub mod process;
pub mod readme;
pub mod relpath;
pub mod replace;
pub mod settings;
pub mod tree;

#[cfg(test)]
mod test_tools;
