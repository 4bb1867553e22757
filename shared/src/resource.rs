//! Resource collections
//!
//! A [`Resource`] is an entity the backend owns and exposes as a REST
//! collection (`GET /users/`, `PUT /users/{id}`, ...). The client crate is
//! generic over this trait, so adding a collection means adding one impl.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;

/// Server-owned entity exposed as a REST collection
pub trait Resource: DeserializeOwned + Clone + fmt::Debug + Send + Sync + 'static {
    /// Server-assigned identity
    type Id: Clone + PartialEq + fmt::Display + fmt::Debug + Send + Sync + 'static;
    /// Body of `POST /<collection>/`
    type Create: Serialize + Clone + fmt::Debug + Send + Sync + 'static;
    /// Body of `PUT /<collection>/{id}`
    type Update: Serialize + Clone + fmt::Debug + Send + Sync + 'static;

    /// Collection path without slashes, e.g. `users`
    const COLLECTION: &'static str;
    /// Display name of one entity, e.g. `user`
    const SINGULAR: &'static str;
    /// Display name of the collection, e.g. `users`
    const PLURAL: &'static str;

    fn id(&self) -> &Self::Id;

    /// Short label naming this entity in prompts
    fn label(&self) -> String;

    /// `/users/`
    fn collection_path() -> String {
        format!("/{}/", Self::COLLECTION)
    }

    /// `/users/{id}`
    fn item_path(id: &Self::Id) -> String {
        format!("/{}/{}", Self::COLLECTION, id)
    }
}
