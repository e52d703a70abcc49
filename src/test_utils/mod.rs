#![allow(missing_docs)]

pub(crate) mod store;

pub(crate) use store::{FlakyStore, Operation, create_test_store, march_scenario};
