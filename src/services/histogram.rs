use plotters::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HistogramError {
    #[error("failed to render histogram: {0}")]
    Render(String),
}

/// Equal-width bins covering `[start, start + width * counts.len())`.
#[derive(Debug, Clone, PartialEq)]
struct Bins {
    start: f64,
    width: f64,
    counts: Vec<usize>,
}

impl Bins {
    /// About √n bins spanning the values. A flat sample gets a single bin
    /// one unit wide.
    fn from_values(values: &[f64]) -> Self {
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let range = max - min;

        let (bin_count, width) = if range > 0.0 {
            let bin_count = ((values.len() as f64).sqrt().ceil() as usize).max(1);
            (bin_count, range / bin_count as f64)
        } else {
            (1, 1.0)
        };

        let mut counts = vec![0usize; bin_count];
        for value in values {
            let slot = ((value - min) / width).floor() as usize;
            counts[slot.min(bin_count - 1)] += 1;
        }
        Self {
            start: min,
            width,
            counts,
        }
    }

    fn end(&self) -> f64 {
        self.start + self.width * self.counts.len() as f64
    }

    fn bars(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        self.counts.iter().enumerate().map(|(slot, count)| {
            let left = self.start + self.width * slot as f64;
            (left, left + self.width, *count)
        })
    }
}

/// Renders the distribution of per-iteration average daily output as a PNG.
pub fn write_histogram_png(output_path: &str, values: &[f64]) -> Result<(), HistogramError> {
    if values.is_empty() {
        return Ok(());
    }
    let bins = Bins::from_values(values);
    let max_count = bins.counts.iter().copied().max().unwrap_or(1);
    let render = |e: &dyn std::fmt::Display| HistogramError::Render(e.to_string());

    let root = BitMapBackend::new(output_path, (800, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| render(&e))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Average Daily Output", ("sans-serif", 30))
        .x_label_area_size(55)
        .y_label_area_size(65)
        .build_cartesian_2d(bins.start..bins.end(), 0..(max_count + 1))
        .map_err(|e| render(&e))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Units per day")
        .y_desc("Iterations")
        .label_style(("sans-serif", 18))
        .axis_desc_style(("sans-serif", 22))
        .x_label_formatter(&|value| format!("{value:.2}"))
        .draw()
        .map_err(|e| render(&e))?;

    let bar_color = RGBColor(46, 139, 87);
    chart
        .draw_series(bins.bars().map(|(left, right, count)| {
            Rectangle::new([(left, 0), (right, count)], bar_color.filled())
        }))
        .map_err(|e| render(&e))?;

    root.present().map_err(|e| render(&e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bins_cover_every_value() {
        let bins = Bins::from_values(&[1.0, 1.2, 2.9, 3.0]);

        assert_eq!(bins.counts.len(), 2);
        assert_eq!(bins.start, 1.0);
        assert_eq!(bins.width, 1.0);
        assert_eq!(bins.counts, vec![2, 2]);
        assert_eq!(bins.end(), 3.0);
    }

    #[test]
    fn flat_sample_uses_one_bin() {
        let bins = Bins::from_values(&[4.0, 4.0, 4.0]);
        assert_eq!(bins.counts, vec![3]);
        assert_eq!(bins.end(), 5.0);
    }

    #[test]
    fn tiny_range_stays_within_bin_count() {
        let low = 2.0;
        let high = low + f64::EPSILON * 4.0;
        let bins = Bins::from_values(&[low, high, low, high]);

        assert_eq!(bins.counts.len(), 2);
        assert_eq!(bins.counts.iter().sum::<usize>(), 4);
        assert_eq!(bins.bars().count(), 2);
    }

    #[test]
    fn write_histogram_png_skips_empty_input() {
        assert!(write_histogram_png("/nonexistent/dir/out.png", &[]).is_ok());
    }
}
