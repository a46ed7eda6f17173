// Library root: the collaborators around the statistics engine (config,
// fetch, export, console report), exposed for the binary and for tests.

pub mod config;
pub mod export;
pub mod fetch;
pub mod report;
