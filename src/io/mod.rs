// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - CityGML reading and JSON export

mod citygml;
mod export;
mod importer;

pub use citygml::parse_citygml;
pub use export::{export_json, ObjectExport, SessionExport};
pub use importer::{import_citygml_file, import_citygml_file_with, ImportSummary};
