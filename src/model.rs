use std::fmt;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    pub participants: Vec<String>,
}

impl Activity {
    /// Capacity minus roster size. Negative when the roster is over capacity.
    pub fn spots_left(&self) -> i64 {
        i64::from(self.max_participants) - self.participants.len() as i64
    }
}

// Wire shape of one catalog entry; the name is the surrounding map key.
#[derive(Debug, Deserialize)]
struct ActivityDetails {
    description: String,
    schedule: String,
    max_participants: u32,
    #[serde(default)]
    participants: Vec<String>,
}

impl ActivityDetails {
    fn named(self, name: String) -> Activity {
        Activity {
            name,
            description: self.description,
            schedule: self.schedule,
            max_participants: self.max_participants,
            participants: self.participants,
        }
    }
}

/// Transient copy of the server's activities, in the order the server sent them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    activities: Vec<Activity>,
}

impl Catalog {
    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Activity> {
        self.activities.iter()
    }

    pub fn get(&self, name: &str) -> Option<&Activity> {
        self.activities.iter().find(|a| a.name == name)
    }

    fn upsert(&mut self, activity: Activity) {
        match self.activities.iter_mut().find(|a| a.name == activity.name) {
            Some(slot) => *slot = activity,
            None => self.activities.push(activity),
        }
    }
}

impl FromIterator<Activity> for Catalog {
    fn from_iter<I: IntoIterator<Item = Activity>>(iter: I) -> Self {
        let mut catalog = Catalog::default();
        for activity in iter {
            catalog.upsert(activity);
        }
        catalog
    }
}

impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CatalogVisitor;

        impl<'de> Visitor<'de> for CatalogVisitor {
            type Value = Catalog;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of activity name to activity details")
            }

            fn visit_map<M: MapAccess<'de>>(self, mut map: M) -> Result<Catalog, M::Error> {
                let mut catalog = Catalog {
                    activities: Vec::with_capacity(map.size_hint().unwrap_or(0)),
                };
                while let Some((name, details)) = map.next_entry::<String, ActivityDetails>()? {
                    catalog.upsert(details.named(name));
                }
                Ok(catalog)
            }
        }

        deserializer.deserialize_map(CatalogVisitor)
    }
}

/// 2xx body of signup/unregister.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MutationReply {
    #[serde(default)]
    pub message: Option<String>,
}

/// Non-2xx body.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ErrorReply {
    #[serde(default)]
    pub detail: Option<String>,
}
