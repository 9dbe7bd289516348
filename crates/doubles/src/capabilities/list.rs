//! List capability - a collection contract used to contrast mocks and spies

use crate::double::{capture, Double};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Minimal growable list
pub trait ListCapability<V> {
    /// Append a value; returns whether the list changed
    fn add(&mut self, value: V) -> bool;

    fn size(&self) -> usize;

    fn get(&self, index: usize) -> Option<V>;

    fn clear(&mut self);
}

impl<V: Clone> ListCapability<V> for Vec<V> {
    fn add(&mut self, value: V) -> bool {
        self.push(value);
        true
    }

    fn size(&self) -> usize {
        self.len()
    }

    fn get(&self, index: usize) -> Option<V> {
        <[V]>::get(self, index).cloned()
    }

    fn clear(&mut self) {
        Vec::clear(self)
    }
}

impl<V> ListCapability<V> for Double<Vec<V>>
where
    V: Clone + Serialize + DeserializeOwned,
{
    fn add(&mut self, value: V) -> bool {
        let args = vec![capture(&value)];
        self.invoke("add", args, |list| ListCapability::add(list, value))
    }

    fn size(&self) -> usize {
        self.invoke("size", vec![], |list| ListCapability::size(list))
    }

    fn get(&self, index: usize) -> Option<V> {
        self.invoke("get", vec![capture(&index)], |list| {
            ListCapability::get(list, index)
        })
    }

    fn clear(&mut self) {
        self.invoke("clear", vec![], |list| ListCapability::clear(list))
    }
}
