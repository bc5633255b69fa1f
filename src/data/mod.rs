//! Input data: the remote/manual monthly series and the static reference tables.

pub mod income;
pub mod manual;
pub mod population;
pub mod sdmx;
pub mod source;
pub mod survey;

pub use income::IncomeTable;
pub use manual::manual_series;
pub use population::PopulationTable;
pub use source::{ManualSource, RemoteSource, SeriesSource, SourceConfig, SourceError, load_with_fallback};
pub use survey::{SurveyTable, SurveyTables};
