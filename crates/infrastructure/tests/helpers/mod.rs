#![allow(dead_code)]

pub mod scripted_transport;

pub use scripted_transport::{dns_answer, Reply, ScriptedTransport};
