// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI output reporter with colored formatting

use crate::geometry::BoundingBox;
use crate::session::SessionStats;
use colored::*;
use std::time::Duration;

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    /// Report session statistics with colors
    pub fn report_stats(file: &str, stats: &SessionStats, duration: Duration) {
        println!("\n{}", "━".repeat(80).bright_black());
        println!("{} {}", "File:".bold(), file.cyan());
        println!("{}", "━".repeat(80).bright_black());

        println!(
            "  {} {}",
            "Objects:".bright_black(),
            stats.objects.to_string().cyan()
        );
        println!(
            "  {} {}",
            "Polygons:".bright_black(),
            stats.polygons.to_string().cyan()
        );
        println!(
            "  {} {}",
            "Triangles:".bright_black(),
            stats.triangles.to_string().cyan()
        );
        println!(
            "  {} {}",
            "Edges:".bright_black(),
            stats.edges.to_string().cyan()
        );

        if !stats.triangles_by_surface.is_empty() {
            println!("\n{}", "Triangles by surface type:".bold());
            for (surface_type, count) in &stats.triangles_by_surface {
                println!(
                    "  {:<28} {}",
                    format!("{}:", surface_type).bright_black(),
                    count.to_string().cyan()
                );
            }
        }

        println!("\n{}", "Bounds:".bold());
        match stats.bounds {
            Some(ref bounds) => println!("  {}", Self::format_bounds(bounds).yellow()),
            None => println!("  {}", "empty".bright_black()),
        }

        println!(
            "\n  {} {}",
            "Time:".bright_black(),
            Self::format_duration(duration).yellow()
        );
        println!("{}", "━".repeat(80).bright_black());
    }

    /// Report error
    pub fn report_error(message: &str) {
        eprintln!("\n{} {}", "❌ Error:".red().bold(), message);
    }

    /// Report warning
    pub fn report_warning(message: &str) {
        println!("\n{} {}", "⚠️  Warning:".yellow().bold(), message);
    }

    /// Print success message
    pub fn success(message: &str) {
        println!("{} {}", "✅".green(), message.green());
    }

    fn format_bounds(bounds: &BoundingBox) -> String {
        format!(
            "min = ({:.3}, {:.3}, {:.3}) max = ({:.3}, {:.3}, {:.3})",
            bounds.min.x, bounds.min.y, bounds.min.z, bounds.max.x, bounds.max.y, bounds.max.z
        )
    }

    /// Format duration for display
    fn format_duration(duration: Duration) -> String {
        let micros = duration.as_micros();

        if micros < 1_000 {
            format!("{}µs", micros)
        } else if micros < 1_000_000 {
            format!("{:.2}ms", micros as f64 / 1_000.0)
        } else {
            format!("{:.2}s", micros as f64 / 1_000_000.0)
        }
    }
}
