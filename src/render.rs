// Copyright 2024 Google LLC
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

//! Substitute the normalized document into an HTML page template.
//!
//! The template is plain text carrying a literal placeholder token.
//! There is no template engine: every occurrence of the token is
//! replaced with the document serialized as indented JSON, and the
//! result is written out unchanged otherwise.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context};

use crate::normalize::Section;

/// Literal token in the template replaced with the serialized document.
pub const PLACEHOLDER: &str = "__DATA__";

/// Replace every occurrence of [`PLACEHOLDER`] in `template` with the
/// document serialized as indented JSON.
///
/// Non-ASCII characters are left unescaped in the serialized data, so
/// the generated page stays readable in a text editor. Fails when the
/// template does not contain the placeholder at all.
pub fn expand_template(template: &str, sections: &[Section]) -> anyhow::Result<String> {
    if !template.contains(PLACEHOLDER) {
        bail!("Placeholder {PLACEHOLDER:?} not found in template");
    }
    let data = serde_json::to_string_pretty(sections)?;
    Ok(template.replace(PLACEHOLDER, &data))
}

/// Read the template at `template_path`, expand the placeholder, and
/// write the page to `output_path`, creating missing parent
/// directories.
pub fn render_to_file(
    template_path: &Path,
    output_path: &Path,
    sections: &[Section],
) -> anyhow::Result<()> {
    let template = fs::read_to_string(template_path)
        .with_context(|| format!("Could not read template {template_path:?}"))?;
    let rendered = expand_template(&template, sections)
        .with_context(|| format!("Could not render template {template_path:?}"))?;

    if let Some(parent) = output_path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Could not create output directory {parent:?}"))?;
    }
    fs::write(output_path, rendered).with_context(|| format!("Could not write {output_path:?}"))?;

    Ok(())
}
