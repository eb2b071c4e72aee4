pub mod common;

pub mod a001_employee;
pub mod a002_contractor;
pub mod a003_client;
pub mod a004_project;
pub mod a005_project_period;
pub mod a006_contract;
pub mod a007_invoice;
pub mod a008_debt;
pub mod a009_absence_day;
