use metric::Report;
use sink::Sink;
use std::cmp;
use std::io::{self, Write};

const X_LABEL: &str = "Seconds elapsed";

/// Plot sink
///
/// Draws a single series as a character chart: seconds elapsed on the x-axis,
/// the derived value on the y-axis, with the metric name as legend. Only one
/// series can be drawn; when the report holds any other number of series the
/// sink warns and draws nothing.
pub struct Plot<W> {
    out: W,
    width: usize,
    height: usize,
}

/// Configuration for the `Plot` sink.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Whether to plot at all.
    pub enabled: bool,
    /// Plot area width, in characters.
    pub width: usize,
    /// Plot area height, in lines.
    pub height: usize,
}

impl Default for PlotConfig {
    fn default() -> PlotConfig {
        PlotConfig {
            enabled: true,
            width: 72,
            height: 20,
        }
    }
}

impl Plot<io::Stdout> {
    /// Create a `Plot` drawing to stdout.
    pub fn stdout(config: &PlotConfig) -> Plot<io::Stdout> {
        Plot::new(io::stdout(), config)
    }
}

impl<W> Plot<W>
where
    W: Write,
{
    /// Create a `Plot` drawing to `out`.
    pub fn new(out: W, config: &PlotConfig) -> Plot<W> {
        Plot {
            out: out,
            width: cmp::max(config.width, 2),
            height: cmp::max(config.height, 2),
        }
    }

    /// Consume the `Plot`, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

fn fmt_value(value: f64) -> String {
    let s = format!("{:.2}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Map `value` in `[lo, hi]` onto one of `cells` cells.
fn scale(value: f64, lo: f64, hi: f64, cells: usize) -> usize {
    if hi <= lo {
        return 0;
    }
    let cell = ((value - lo) / (hi - lo) * (cells - 1) as f64).round();
    cmp::min(cell as usize, cells - 1)
}

/// Render one series as lines of text
///
/// `xs` and `ys` are parallel. Points whose value is not finite are left
/// out. The plot area is `width` characters by `height` lines, framed by
/// y-axis bounds on the left and x-axis bounds underneath, followed by the
/// x-axis label and the legend.
pub fn render(name: &str, xs: &[i64], ys: &[f64], width: usize, height: usize) -> Vec<String> {
    let width = cmp::max(width, 2);
    let height = cmp::max(height, 2);
    let points: Vec<(i64, f64)> = xs.iter()
        .cloned()
        .zip(ys.iter().cloned())
        .filter(|&(_, y)| y.is_finite())
        .collect();

    let mut lines = Vec::with_capacity(height + 4);
    if points.is_empty() {
        lines.push("(no data)".to_string());
    } else {
        let (x0, y0) = points[0];
        let (x_min, x_max, y_min, mut y_max) = points.iter().fold(
            (x0, x0, y0, y0),
            |(x_min, x_max, y_min, y_max), &(x, y)| {
                (
                    cmp::min(x_min, x),
                    cmp::max(x_max, x),
                    y_min.min(y),
                    y_max.max(y),
                )
            },
        );
        if y_max <= y_min {
            y_max = y_min + 1.0;
        }

        let mut grid = vec![vec![' '; width]; height];
        for &(x, y) in &points {
            let col = scale(x as f64, x_min as f64, x_max as f64, width);
            let row = scale(y, y_min, y_max, height);
            grid[height - 1 - row][col] = '*';
        }

        let top = fmt_value(y_max);
        let bottom = fmt_value(y_min);
        let label_width = cmp::max(top.len(), bottom.len());
        for (idx, row) in grid.iter().enumerate() {
            let label = if idx == 0 {
                top.as_str()
            } else if idx == height - 1 {
                bottom.as_str()
            } else {
                ""
            };
            let row: String = row.iter().collect();
            let line = format!("{:>w$} |{}", label, row, w = label_width);
            lines.push(line.trim_end().to_string());
        }
        lines.push(format!("{:>w$} +{}", "", "-".repeat(width), w = label_width));

        let left = x_min.to_string();
        let right = x_max.to_string();
        let ticks = if x_max > x_min {
            let gap = width.saturating_sub(left.len() + right.len());
            format!("{}{}{}", left, " ".repeat(gap), right)
        } else {
            left
        };
        lines.push(format!("{:>w$}  {}", "", ticks, w = label_width));

        let pad = label_width + 2 + width.saturating_sub(X_LABEL.len()) / 2;
        lines.push(format!("{}{}", " ".repeat(pad), X_LABEL));
    }
    lines.push(format!("  * {}", name));
    lines
}

impl<W> Sink for Plot<W>
where
    W: Write,
{
    fn name(&self) -> &str {
        "plot"
    }

    fn deliver(&mut self, report: &Report) -> io::Result<()> {
        if report.series.len() != 1 {
            warn!(
                "Not generating plot for {} metrics, only a single metric can be plotted",
                report.series.len()
            );
            return Ok(());
        }
        let series = &report.series[0];
        let xs = report.timeline.relative();
        info!("Plotting {} values", xs.len());
        for line in render(
            series.name(),
            &xs,
            series.derived_values(),
            self.width,
            self.height,
        ) {
            writeln!(self.out, "{}", line)?;
        }
        self.out.flush()
    }
}
