//! Serde helpers for keyed maps the API sends as `[]` when they are empty.

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize)]
#[serde(untagged)]
enum MapOrList<M> {
    Map(M),
    List(Vec<Value>),
}

impl<M: Default> MapOrList<M> {
    fn into_map<E: de::Error>(self) -> Result<M, E> {
        match self {
            MapOrList::Map(map) => Ok(map),
            MapOrList::List(list) if list.is_empty() => Ok(M::default()),
            MapOrList::List(_) => Err(E::custom("expected a map or an empty list")),
        }
    }
}

/// Deserializes a map, reading an empty list as an empty map.
pub fn deserialize<'de, D, M>(deserializer: D) -> Result<M, D::Error>
where
    D: Deserializer<'de>,
    M: Deserialize<'de> + Default,
{
    MapOrList::<M>::deserialize(deserializer)?.into_map()
}

/// Deserializes a nullable map, reading an empty list as an empty map.
pub fn deserialize_option<'de, D, M>(deserializer: D) -> Result<Option<M>, D::Error>
where
    D: Deserializer<'de>,
    M: Deserialize<'de> + Default,
{
    Option::<MapOrList<M>>::deserialize(deserializer)?
        .map(MapOrList::into_map)
        .transpose()
}
