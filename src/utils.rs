use anyhow::{bail, Error};
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use std::ops::Deref;

/// A wire array that must contain at least one element.
///
/// Identity assurance members such as `evidence` and `attachments` are either
/// omitted entirely or carry at least one entry; an empty array is rejected at
/// the serde boundary.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(try_from = "Vec<T>", into = "Vec<T>")]
pub struct NonEmptyVec<T: Clone>(Vec<T>);

impl<T: Clone> NonEmptyVec<T> {
    pub fn new(t: T) -> Self {
        Self(vec![t])
    }

    pub fn maybe_new(v: Vec<T>) -> Option<Self> {
        Self::try_from(v).ok()
    }

    pub fn push(&mut self, t: T) {
        self.0.push(t)
    }

    pub fn first(&self) -> &T {
        &self.0[0]
    }

    pub fn into_inner(self) -> Vec<T> {
        self.0
    }
}

impl<T: Clone> TryFrom<Vec<T>> for NonEmptyVec<T> {
    type Error = Error;

    fn try_from(v: Vec<T>) -> Result<NonEmptyVec<T>, Error> {
        if v.is_empty() {
            bail!("cannot create a NonEmptyVec from an empty Vec")
        }
        Ok(NonEmptyVec(v))
    }
}

impl<T: Clone> From<NonEmptyVec<T>> for Vec<T> {
    fn from(NonEmptyVec(v): NonEmptyVec<T>) -> Vec<T> {
        v
    }
}

impl<T> TryFrom<Json> for NonEmptyVec<T>
where
    T: TryFrom<Json, Error = Error> + Clone,
{
    type Error = Error;

    fn try_from(value: Json) -> Result<Self, Error> {
        let Json::Array(items) = value else {
            bail!("expected a JSON array")
        };
        items
            .into_iter()
            .map(T::try_from)
            .collect::<Result<Vec<_>, Error>>()?
            .try_into()
    }
}

impl<T> From<NonEmptyVec<T>> for Json
where
    T: Into<Json> + Clone,
{
    fn from(value: NonEmptyVec<T>) -> Json {
        Json::Array(value.0.into_iter().map(Into::into).collect())
    }
}

impl<T: Clone> IntoIterator for NonEmptyVec<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T: Clone> IntoIterator for &'a NonEmptyVec<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<T: Clone> AsRef<[T]> for NonEmptyVec<T> {
    fn as_ref(&self) -> &[T] {
        &self.0
    }
}

impl<T: Clone> Deref for NonEmptyVec<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.0
    }
}
