use std::fmt::Write;

use markovian_core::{ChainError, Renderer, Series};

/// Renders series as horizontal text bar charts.
///
/// Each x value gets one line per series, labelled through `labels`.
pub struct TextRenderer {
	labels: Vec<String>,
	width: usize,
}

impl TextRenderer {
	pub fn new(labels: Vec<String>, width: usize) -> Self {
		Self { labels, width }
	}

	fn label(&self, x: f64) -> &str {
		self.labels.get(x as usize).map(String::as_str).unwrap_or("?")
	}
}

impl Renderer for TextRenderer {
	fn render(&self, series: &[Series], title: &str) -> Result<Vec<u8>, ChainError> {
		let max = series
			.iter()
			.flat_map(|s| s.points.iter().map(|&(_, y)| y))
			.fold(0.0_f64, f64::max);
		if max <= 0.0 {
			return Err(ChainError::Render { reason: "nothing to plot".to_owned() });
		}

		let name_width = series.iter().map(|s| s.name.len()).max().unwrap_or(0);
		let mut out = format!("{title}\n");
		for s in series {
			for &(x, y) in &s.points {
				let bar = "#".repeat(((y / max) * self.width as f64).round() as usize);
				writeln!(out, "{:>4} {:<name_width$} {:.4} {bar}", format!("{:?}", self.label(x)), s.name, y)
					.map_err(|e| ChainError::Render { reason: e.to_string() })?;
			}
		}
		Ok(out.into_bytes())
	}
}
