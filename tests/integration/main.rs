//! HTTP integration tests driving the full router on the in-memory store.

mod helpers;

mod account_test;
mod auth_test;
mod group_test;
mod link_test;
mod member_test;
mod vocabulary_test;
