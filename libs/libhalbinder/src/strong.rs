// Copyright 2024, The Android Open Source Project
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Reference counted service handles.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Base trait of every service and callback interface.
pub trait Interface: Send + Sync {}

/// A strong reference to a service or callback object.
///
/// Two handles are equal iff they refer to the same object, regardless of the interface they are
/// viewed through. This is what services use to recognise a listener on unregistration.
pub struct Strong<T: ?Sized>(Arc<T>);

impl<T: ?Sized> Strong<T> {
    pub fn new(object: Arc<T>) -> Self {
        Self(object)
    }

    /// Returns true if both handles refer to the same object.
    pub fn same_object<U: ?Sized>(&self, other: &Strong<U>) -> bool {
        self.address() == other.address()
    }

    fn address(&self) -> *const () {
        Arc::as_ptr(&self.0) as *const ()
    }
}

impl<T: ?Sized> Clone for Strong<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: ?Sized> Deref for Strong<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: ?Sized> AsRef<T> for Strong<T> {
    fn as_ref(&self) -> &T {
        &self.0
    }
}

impl<T: ?Sized> PartialEq for Strong<T> {
    fn eq(&self, other: &Self) -> bool {
        self.same_object(other)
    }
}

impl<T: ?Sized> Eq for Strong<T> {}

impl<T: ?Sized> fmt::Debug for Strong<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Strong({:p})", self.address())
    }
}
