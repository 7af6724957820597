//! Unit tests for the gateway service
