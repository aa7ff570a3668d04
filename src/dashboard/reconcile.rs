use crate::models::ApiKey;

/// A server-confirmed change to the key list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyChange {
    Loaded(Vec<ApiKey>),
    Created(ApiKey),
    Renamed(ApiKey),
    Deleted(String),
}

/// Applies a confirmed change to the prior list and returns the next list.
///
/// - `Loaded` replaces the list wholesale.
/// - `Created` appends, or replaces in place if the id is already listed.
/// - `Renamed` replaces the record with the same id; unknown ids leave the
///   list as it was.
/// - `Deleted` removes the record with that id, if any.
pub fn reconcile(prior: &[ApiKey], change: KeyChange) -> Vec<ApiKey> {
    match change {
        KeyChange::Loaded(keys) => keys,
        KeyChange::Created(key) => {
            let mut next = prior.to_vec();
            match next.iter_mut().find(|k| k.id == key.id) {
                Some(existing) => *existing = key,
                None => next.push(key),
            }
            next
        }
        KeyChange::Renamed(key) => prior
            .iter()
            .map(|k| if k.id == key.id { key.clone() } else { k.clone() })
            .collect(),
        KeyChange::Deleted(id) => prior.iter().filter(|k| k.id != id).cloned().collect(),
    }
}
