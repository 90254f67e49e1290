//! Statistics charts: static descriptors, series builders and the
//! aggregator that fans fetches out and routes results to a render surface.

pub mod aggregator;
pub mod series;
pub mod spec;

pub use aggregator::{ChartAggregator, ChartState, FetchRequest};
pub use series::{build_series, BuildError, Series, SeriesDataset};
pub use spec::{ChartId, ChartKind, ChartSpec, RenderOptions, SeriesBuilder, CHART_SPECS};
