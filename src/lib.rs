//! PetHotel AI - terminal chat client for the pet hotel analytics API
//!
//! Questions go to the assistant's `/chat` endpoint through a transport with
//! per-attempt timeouts and linear-backoff retries. Answers that map to a
//! known report trigger a follow-up `/execute-query` whose results are
//! previewed in the transcript. A health ticker gates sending on API
//! reachability, and usage statistics persist across sessions.

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod conversation;
pub mod format;
pub mod health;
pub mod logging;
pub mod stats;
pub mod storage;
pub mod transport;
pub mod ui;
