//! Platform session constructor.
//!
//! Returns a [`store::Session`] backed by the appropriate [`store::SessionStore`]:
//! - **Web** (WASM + `web` feature): `localStorage` via [`store::LocalStorageStore`]
//! - **Anything else**: an in-memory store that forgets the session on exit

/// Restore the session persisted by a previous visit, if any.
pub fn make_session() -> store::Session {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        store::Session::load(store::LocalStorageStore::new())
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        store::Session::load(store::MemoryStore::new())
    }
}
