// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 Alexandre Severino
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use std::marker::PhantomData;
use std::ops::Index;

/// Marker for the element family a [`PropertyMap`] is keyed by.
pub trait ElementKind {}

#[derive(Debug, Clone, Copy)]
pub struct VertexKind;
#[derive(Debug, Clone, Copy)]
pub struct HalfEdgeKind;

impl ElementKind for VertexKind {}
impl ElementKind for HalfEdgeKind {}

/// Side table attaching a `V` to every element id of kind `K`.
///
/// The table grows lazily: reading an id that was never written yields the
/// default value, so it never needs resizing when the mesh grows.
#[derive(Debug, Clone)]
pub struct PropertyMap<K: ElementKind, V> {
    data: Vec<V>,
    default: V,
    _kind: PhantomData<fn() -> K>,
}

pub type VertexProperty<V> = PropertyMap<VertexKind, V>;
pub type HalfEdgeProperty<V> = PropertyMap<HalfEdgeKind, V>;

impl<K: ElementKind, V: Clone> PropertyMap<K, V> {
    pub fn new(default: V) -> Self {
        Self {
            data: Vec::new(),
            default,
            _kind: PhantomData,
        }
    }

    pub fn get(&self, id: usize) -> &V {
        self.data.get(id).unwrap_or(&self.default)
    }

    pub fn get_mut(&mut self, id: usize) -> &mut V {
        if id >= self.data.len() {
            self.data.resize(id + 1, self.default.clone());
        }
        &mut self.data[id]
    }

    pub fn set(&mut self, id: usize, value: V) {
        *self.get_mut(id) = value;
    }

    /// Puts `id` back to the default value.
    pub fn reset(&mut self, id: usize) {
        if id < self.data.len() {
            self.data[id] = self.default.clone();
        }
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Rebuilds the table for a renumbered id space.
    pub fn remapped(&self, remap: &[usize]) -> Self {
        let mut out = Self::new(self.default.clone());
        for (old, &new) in remap.iter().enumerate() {
            if new != usize::MAX && old < self.data.len() {
                out.set(new, self.data[old].clone());
            }
        }
        out
    }
}

impl<K: ElementKind, V: Clone + Default> Default for PropertyMap<K, V> {
    fn default() -> Self {
        Self::new(V::default())
    }
}

impl<K: ElementKind, V: Clone> Index<usize> for PropertyMap<K, V> {
    type Output = V;

    fn index(&self, id: usize) -> &V {
        self.get(id)
    }
}
