// chatsync/chatsync-utils
//
// Copyright: 2024, The chatsync developers
// License: Mozilla Public License v2.0 (MPL v2.0)

//! Bounds that collapse to nothing in the browser.
//!
//! Futures and callbacks handed across async seams must be `Send + Sync` on native targets
//! (so that they can live on a multi-threaded runtime) but cannot be on `wasm32`, where
//! everything runs on the single JS event loop and the platform types are `!Send`.

use std::future::Future;
use std::pin::Pin;

#[cfg(not(target_arch = "wasm32"))]
pub trait SendUnlessWasm: Send {}
#[cfg(not(target_arch = "wasm32"))]
impl<T: Send + ?Sized> SendUnlessWasm for T {}

#[cfg(target_arch = "wasm32")]
pub trait SendUnlessWasm {}
#[cfg(target_arch = "wasm32")]
impl<T: ?Sized> SendUnlessWasm for T {}

#[cfg(not(target_arch = "wasm32"))]
pub trait SyncUnlessWasm: Sync {}
#[cfg(not(target_arch = "wasm32"))]
impl<T: Sync + ?Sized> SyncUnlessWasm for T {}

#[cfg(target_arch = "wasm32")]
pub trait SyncUnlessWasm {}
#[cfg(target_arch = "wasm32")]
impl<T: ?Sized> SyncUnlessWasm for T {}

#[cfg(not(target_arch = "wasm32"))]
pub type PinnedFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;
#[cfg(target_arch = "wasm32")]
pub type PinnedFuture<T> = Pin<Box<dyn Future<Output = T>>>;
