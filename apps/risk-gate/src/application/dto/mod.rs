//! Data Transfer Objects (DTOs)
//!
//! DTOs are used for API boundaries and use case inputs/outputs.

mod risk_dto;

pub use risk_dto::{
    CheckResultDto, EvaluateOrderRequestDto, OrderIntentDto, RiskAuditEntry, RiskReportDto,
};
