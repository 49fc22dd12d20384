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

//! Create a parallel-text HTML page from a JSON file.
//!
//! The JSON source may be a flat list of sentences, a list of sections,
//! or an object wrapping either shape under a `sections` key. The
//! normalized document replaces the `__DATA__` placeholder in the HTML
//! template, and the result is written as a self-contained page.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;
use parallel_text_html::normalize::normalize;
use parallel_text_html::render::render_to_file;

#[derive(Clone, Debug, Parser)]
#[command(about = "Create a parallel-text HTML page from a JSON file.")]
struct Args {
    /// Path to the JSON input file.
    json_path: PathBuf,
    /// HTML template containing the __DATA__ placeholder.
    template_path: PathBuf,
    /// Where to write the generated HTML.
    output_path: PathBuf,
    /// Section title to use when the JSON is a flat list.
    #[arg(long, default_value = "Text")]
    default_section: String,
    /// Language code used when the JSON uses a single 'translation' string.
    #[arg(long, default_value = "en")]
    default_lang: String,
}

fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().filter_or("RUST_LOG", "info"));
    let args = Args::parse();

    let raw = fs::read_to_string(&args.json_path)
        .with_context(|| format!("Could not read {:?}", args.json_path))?;
    let data = serde_json::from_str(&raw)
        .with_context(|| format!("Could not parse {:?} as JSON", args.json_path))?;

    let sections = normalize(&data, &args.default_section, &args.default_lang)?;
    info!(
        "Normalized {} sections with {} sentences",
        sections.len(),
        sections
            .iter()
            .map(|section| section.sentences.len())
            .sum::<usize>()
    );

    render_to_file(&args.template_path, &args.output_path, &sections)?;
    info!("Wrote {}", args.output_path.display());

    Ok(())
}
