pub mod util_hash;
