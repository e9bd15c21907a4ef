//! Domain collections of the operations board
//!
//! Each module describes one list view: its fields, wire mapping and
//! derived-field calculation.

pub mod common;

pub mod a001_equipment;
pub mod a002_inventory;
pub mod a003_project;
pub mod a004_operation;
pub mod a005_production;
pub mod a006_incident;
pub mod a007_risk_assessment;
pub mod a008_employee;
