//! Wire records exchanged with the DataWise REST API.

pub mod auth;
pub mod lgpd;

pub use auth::{
    LoginCredentials, LoginResponse, MessageResponse, RegisterData, TokenValidation, User,
    UserRole,
};
pub use lgpd::{
    AnalysisConfig, AnalysisResult, AnalysisStatus, AnalysisTicket, ComplianceIssue,
    ComplianceReport, NewPersonalData, PersonalData, PersonalDataPatch, Sensitivity, Template,
};
