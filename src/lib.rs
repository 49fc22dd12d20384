// Copyright 2023 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Helpers for publishing parallel (original + translated) texts.
//!
//! Authors describe their text sentence by sentence in JSON, in any of
//! several permissive shapes. The [`normalize`] module coerces those
//! shapes into one canonical sectioned document, and the [`render`]
//! module substitutes the serialized document into a static HTML
//! template. The `parallel-text-html` binary wires the two together
//! behind a command line.

pub mod normalize;
pub mod render;
