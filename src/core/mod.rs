pub mod layout;
pub mod primitives;
pub mod scale;
pub mod scale_set;
pub mod selection;
pub mod series;
pub mod types;

pub use layout::{DEFAULT_X_AXIS_HEIGHT, Layout, Y_AXIS_LABEL_WIDTH, Y_AXIS_WIDTH};
pub use scale::LinearScale;
pub use scale_set::{DomainOverride, ScaleSet};
pub use selection::{EQUAL_X_THRESHOLD, SelectedSeries, find_selected_series};
pub use series::{Series, UNKNOWN_UNITS, distinct_unit_keys, has_data};
pub use types::{ChartPoint, ContainerSize, Margin};
