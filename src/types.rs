//! Core data types

use crate::analysis::differencing;
use crate::error::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Time-indexed numeric sequence with one observation per day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    pub name: String,
    pub dates: Vec<NaiveDate>,
    pub data: Vec<f64>,
}

impl TimeSeries {
    /// Build a series whose dates run daily from `start`
    pub fn daily(name: &str, start: NaiveDate, data: Vec<f64>) -> Self {
        let dates = start.iter_days().take(data.len()).collect();
        Self {
            name: name.to_string(),
            dates,
            data,
        }
    }

    /// Build a series from explicit dates, which must be consecutive days
    pub fn from_parts(name: &str, dates: Vec<NaiveDate>, data: Vec<f64>) -> Result<Self> {
        if dates.len() != data.len() {
            return Err(Error::InvalidInput(format!(
                "{} dates for {} values",
                dates.len(),
                data.len()
            )));
        }
        if let Some(pair) = dates.windows(2).find(|w| w[0].succ_opt() != Some(w[1])) {
            return Err(Error::InvalidInput(format!(
                "dates must advance one day at a time, found {} -> {}",
                pair[0], pair[1]
            )));
        }
        Ok(Self {
            name: name.to_string(),
            dates,
            data,
        })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn start(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    /// Iterate over `(date, value)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.dates.iter().copied().zip(self.data.iter().copied())
    }

    /// First-order difference; the first date is dropped with the undefined value
    pub fn difference(&self) -> Result<Self> {
        self.difference_order(1)
    }

    /// Difference `order` times, dropping `order` leading dates
    pub fn difference_order(&self, order: usize) -> Result<Self> {
        let data = differencing::difference_n(&self.data, order)?;
        Ok(Self {
            name: format!("{} (diff {})", self.name, order),
            dates: self.dates_after(order)?,
            data,
        })
    }

    /// Seasonal difference at `lag`, dropping `lag` leading dates
    pub fn seasonal_difference(&self, lag: usize) -> Result<Self> {
        let data = differencing::seasonal_difference(&self.data, lag)?;
        Ok(Self {
            name: format!("{} (seasonal diff {})", self.name, lag),
            dates: self.dates_after(lag)?,
            data,
        })
    }

    fn dates_after(&self, skip: usize) -> Result<Vec<NaiveDate>> {
        if self.dates.len() != self.data.len() {
            return Err(Error::InvalidInput(format!(
                "{} dates for {} values",
                self.dates.len(),
                self.data.len()
            )));
        }
        self.dates
            .get(skip..)
            .map(<[NaiveDate]>::to_vec)
            .ok_or(Error::InsufficientData {
                needed: skip,
                got: self.dates.len(),
            })
    }
}
