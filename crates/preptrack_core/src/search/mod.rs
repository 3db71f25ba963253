//! Catalog search.

pub mod topic_search;
