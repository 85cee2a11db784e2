//! Measurement rows and catalog autofill.
//!
//! The form always holds at least one row. Choosing an instrument name looks it up in
//! the session's `MeasurementCatalog` and overwrites both certificate fields of that
//! row; names the catalog does not know blank them.

use super::FormSession;
use crate::error::FormError;
use crate::model::measurement::MeasurementRow;

impl<H> FormSession<H> {
    /// Appends an empty row and returns its index.
    pub fn add_row(&mut self) -> usize {
        self.measurements.push(MeasurementRow::default());
        self.measurements.len() - 1
    }

    /// Removes the row at `index`; later rows shift down by one.
    pub fn remove_row(&mut self, index: usize) -> Result<MeasurementRow, FormError> {
        self.check_row(index)?;
        if self.measurements.len() == 1 {
            return Err(FormError::LastMeasurementRow);
        }
        Ok(self.measurements.remove(index))
    }

    /// Sets the instrument name without touching the certificate fields.
    pub fn set_row_measurement(
        &mut self,
        index: usize,
        name: impl Into<String>,
    ) -> Result<(), FormError> {
        self.row_mut(index)?.measurement = name.into();
        Ok(())
    }

    /// Sets the instrument name and autofills the certificate from the catalog.
    ///
    /// # Arguments
    ///
    /// * `index` - Row to update.
    /// * `name` - Instrument name as chosen by the user.
    ///
    /// # Returns
    ///
    /// `true` when the catalog knew the name.
    pub fn on_row_measurement_changed(
        &mut self,
        index: usize,
        name: impl Into<String>,
    ) -> Result<bool, FormError> {
        let name = name.into();
        let info = self.catalog.lookup(&name).cloned();
        let row = self.row_mut(index)?;
        row.measurement = name;
        row.apply_certificate(info.as_ref());
        if info.is_none() {
            log::debug!("no certificate on file for {:?}", row.measurement);
        }
        Ok(info.is_some())
    }

    pub fn set_row_certificate_no(
        &mut self,
        index: usize,
        value: impl Into<String>,
    ) -> Result<(), FormError> {
        self.row_mut(index)?.certificate_no = value.into();
        Ok(())
    }

    pub fn set_row_certificate_date(
        &mut self,
        index: usize,
        value: impl Into<String>,
    ) -> Result<(), FormError> {
        self.row_mut(index)?.certificate_date = value.into();
        Ok(())
    }

    fn check_row(&self, index: usize) -> Result<(), FormError> {
        let len = self.measurements.len();
        if index >= len {
            return Err(FormError::RowOutOfRange { index, len });
        }
        Ok(())
    }

    fn row_mut(&mut self, index: usize) -> Result<&mut MeasurementRow, FormError> {
        self.check_row(index)?;
        Ok(&mut self.measurements[index])
    }
}
