mod in_memory_account_store;

pub use in_memory_account_store::InMemoryAccountStore;
