//! Core data engine for an interactive CSV dashboard.
//!
//! The presentation layer (whatever renders widgets and charts) is an
//! external collaborator; this crate is the pipeline it calls into:
//!
//! ```text
//!  upload bytes (CSV)
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse + per-column type inference → Table
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ inspect   │  key metrics, describe() stats, column descriptors
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  equality predicate → row-subset view
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  chart    │  line / pie / bar projection of the view
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  export   │  view → CSV bytes for download
//!   └──────────┘
//! ```
//!
//! Every stage is a pure function of its inputs. The only stateful piece is
//! [`Session`], which holds the one currently loaded table on the boundary
//! layer's behalf and replaces it wholesale on each new upload.

pub mod chart;
pub mod error;
pub mod export;
pub mod filter;
pub mod inspect;
pub mod loader;
pub mod model;
pub mod session;

pub use chart::{project, ChartData, ChartKind, ChartRequest, PieSlice};
pub use error::{ChartError, ExportError, ParseError};
pub use export::to_csv_bytes;
pub use filter::{apply, FilterPredicate};
pub use inspect::{inspect, ColumnStats, TableSummary};
pub use loader::load;
pub use model::{CellValue, Column, ColumnDescriptor, ColumnType, Table};
pub use session::Session;
