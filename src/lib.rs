//! 가정 양조 계산 로직을 라이브러리로 분리하여 CLI 외의 프런트엔드에서도 재사용한다.
//!
//! 참조 표([`tables::ReferenceTables`])를 한 번 읽은 뒤 각 계산기에 참조로 넘긴다.

pub mod alcohol;
pub mod app;
pub mod carbonation;
pub mod cli;
pub mod config;
pub mod conversion;
pub mod interpolation;
pub mod logging;
pub mod quantity;
pub mod recipe;
pub mod tables;
pub mod units;
