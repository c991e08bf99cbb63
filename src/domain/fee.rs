//! Fee-structure domain models: components, instalments, payment windows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::errors::CampusError;
use crate::domain::common::{Amounted, Identifiable, NamedEntity};

/// A named charge contributing to a structure's total payable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FeeComponent {
    pub id: Uuid,
    pub name: String,
    /// Whole currency units; never negative once persisted.
    pub base_amount: i64,
}

impl FeeComponent {
    pub fn new(name: impl Into<String>, base_amount: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            base_amount,
        }
    }
}

impl Identifiable for FeeComponent {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for FeeComponent {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Amounted for FeeComponent {
    fn base_amount(&self) -> i64 {
        self.base_amount
    }
}

/// One partial-payment period of a fee structure.
///
/// The collection window and the online-payment window are independent; each
/// end is optional, but a window with both ends set must be ordered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Instalment {
    /// 1-based position within the owning structure.
    pub instalment_number: u32,
    pub base_amount: i64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub online_start_date: Option<NaiveDate>,
    pub online_end_date: Option<NaiveDate>,
}

impl Instalment {
    /// A zero-amount instalment with no windows set.
    pub fn empty(instalment_number: u32) -> Self {
        Self {
            instalment_number,
            base_amount: 0,
            start_date: None,
            end_date: None,
            online_start_date: None,
            online_end_date: None,
        }
    }

    /// Checks that each fully-specified window starts on or before its end.
    pub fn validate(&self) -> Result<(), CampusError> {
        check_window(
            self.instalment_number,
            "collection",
            self.start_date,
            self.end_date,
        )?;
        check_window(
            self.instalment_number,
            "online payment",
            self.online_start_date,
            self.online_end_date,
        )?;
        Ok(())
    }
}

impl Amounted for Instalment {
    fn base_amount(&self) -> i64 {
        self.base_amount
    }
}

fn check_window(
    number: u32,
    label: &str,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<(), CampusError> {
    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            return Err(CampusError::InvalidInput(format!(
                "instalment {number} {label} window starts after it ends ({start} > {end})"
            )));
        }
    }
    Ok(())
}

/// A named bundle of fee components and, optionally, an instalment split.
///
/// `number_of_instalments` is 1 while the split is disabled; enabling it sets
/// the count and populates `instalments` with exactly that many records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FeesStructure {
    pub id: Uuid,
    pub name: String,
    pub number_of_instalments: u32,
    pub components: Vec<FeeComponent>,
    pub instalments: Vec<Instalment>,
}

impl FeesStructure {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            number_of_instalments: 1,
            components: Vec::new(),
            instalments: Vec::new(),
        }
    }

    pub fn instalments_enabled(&self) -> bool {
        self.number_of_instalments > 1
    }

    pub fn add_component(&mut self, component: FeeComponent) -> Uuid {
        let id = component.id;
        self.components.push(component);
        id
    }
}

impl Identifiable for FeesStructure {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for FeesStructure {
    fn name(&self) -> &str {
        &self.name
    }
}
