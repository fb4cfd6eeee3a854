//! Carnet: a local-first personal recipe catalog.
//!
//! **All state is one plain JSON file.** There is no server, no sync,
//! and no database: the catalog is an in-memory collection mirrored to
//! a single durable slot on every mutation.
//!
//! # Architecture
//!
//! - [`core::store`]: sole owner of the collection and its durable
//!   mirror; create/update/delete and derived reads all pass through it.
//! - [`core::query`]: pure filter/search/sort producing the visible list.
//! - [`core::controller`]: list/form/detail screen state machine for the
//!   interactive surface.
//! - [`core::mirror`]: the persistence port — a JSON file in production,
//!   an in-memory fake in tests.
//! - [`core::form`]: boundary parsing/validation; nothing malformed
//!   reaches the store.
//!
//! # Examples
//!
//! ```bash
//! # Add a recipe
//! carnet add "Crêpes" --category desserts --time 20 --servings 4 \
//!     --ingredients $'250g de farine\n3 œufs\n500ml de lait' \
//!     --instructions $'Mélanger\nLaisser reposer\nCuire'
//!
//! # Search and sort
//! carnet list --search citron --sort popular
//!
//! # Browse interactively
//! carnet browse
//! ```

pub mod core;
