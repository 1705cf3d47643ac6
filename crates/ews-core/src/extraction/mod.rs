pub mod aliases;
pub mod convention;
pub mod detect;
pub mod header;
pub mod locate;
pub mod statement;
pub mod table;

pub use aliases::{AliasDictionaries, ConceptAliasTable, SheetNameAliases};
pub use convention::{StatementConvention, StatementSheets};
pub use detect::{detect_table_format, detect_workbook_format, resolve_convention, FormatConvention};
pub use header::{CompanyInfo, ScaleFactor, YearColumnMap};
pub use statement::{extract_financial_statements, extract_or_report, ExtractionResult};
pub use table::{CellValue, RawTable, Sheet, Workbook};
