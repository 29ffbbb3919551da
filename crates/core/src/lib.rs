//! Domain types shared by the index and the HTTP server.

pub mod domain;
