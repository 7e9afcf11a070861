//! New reservation form state.

use chrono::Local;

use fuego_core::models::NewReservation;

/// Maximum characters accepted in any form field.
pub const MAX_FIELD_LENGTH: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    ClientName,
    Phone,
    Pax,
    Date,
    Time,
    TableType,
}

impl FormField {
    pub const ALL: [FormField; 6] = [
        FormField::ClientName,
        FormField::Phone,
        FormField::Pax,
        FormField::Date,
        FormField::Time,
        FormField::TableType,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::ClientName => "Name",
            FormField::Phone => "Phone",
            FormField::Pax => "Guests",
            FormField::Date => "Date",
            FormField::Time => "Time",
            FormField::TableType => "Table",
        }
    }

    pub fn next(&self) -> Self {
        let i = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        let i = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReservationForm {
    pub client_name: String,
    pub phone: String,
    pub pax: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub time: String,
    pub table_type: String,
    pub focus: FormField,
    pub error: Option<String>,
}

impl Default for ReservationForm {
    fn default() -> Self {
        Self {
            client_name: String::new(),
            phone: String::new(),
            pax: "2 Pessoas".to_string(),
            date: Local::now().format("%Y-%m-%d").to_string(),
            time: "20:00".to_string(),
            table_type: "Salão Principal".to_string(),
            focus: FormField::ClientName,
            error: None,
        }
    }
}

impl ReservationForm {
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::ClientName => &self.client_name,
            FormField::Phone => &self.phone,
            FormField::Pax => &self.pax,
            FormField::Date => &self.date,
            FormField::Time => &self.time,
            FormField::TableType => &self.table_type,
        }
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::ClientName => &mut self.client_name,
            FormField::Phone => &mut self.phone,
            FormField::Pax => &mut self.pax,
            FormField::Date => &mut self.date,
            FormField::Time => &mut self.time,
            FormField::TableType => &mut self.table_type,
        }
    }

    pub fn push(&mut self, c: char) {
        let field = self.focused_mut();
        if !c.is_control() && field.chars().count() < MAX_FIELD_LENGTH {
            field.push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.focused_mut().pop();
    }

    /// Check required fields and build the booking.
    pub fn validate(&self) -> Result<NewReservation, String> {
        if self.client_name.trim().is_empty() {
            return Err("Name is required".to_string());
        }
        if chrono::NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").is_err() {
            return Err("Date must be YYYY-MM-DD".to_string());
        }
        if chrono::NaiveTime::parse_from_str(self.time.trim(), "%H:%M").is_err() {
            return Err("Time must be HH:MM".to_string());
        }
        Ok(NewReservation {
            client_name: self.client_name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            pax: self.pax.trim().to_string(),
            date: self.date.trim().to_string(),
            time: self.time.trim().to_string(),
            table_type: self.table_type.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_cycle_wraps() {
        assert_eq!(FormField::ClientName.next(), FormField::Phone);
        assert_eq!(FormField::TableType.next(), FormField::ClientName);
        assert_eq!(FormField::ClientName.prev(), FormField::TableType);
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut form = ReservationForm::default();
        for c in "Ana".chars() {
            form.push(c);
        }
        form.focus = FormField::Phone;
        form.push('1');
        form.push('\n');
        assert_eq!(form.client_name, "Ana");
        assert_eq!(form.phone, "1");
        form.backspace();
        assert_eq!(form.phone, "");
    }

    #[test]
    fn test_field_length_is_capped() {
        let mut form = ReservationForm::default();
        for _ in 0..(MAX_FIELD_LENGTH + 10) {
            form.push('a');
        }
        assert_eq!(form.client_name.len(), MAX_FIELD_LENGTH);
    }

    #[test]
    fn test_validate() {
        let mut form = ReservationForm::default();
        assert_eq!(form.validate(), Err("Name is required".to_string()));

        form.client_name = "  Bruno ".to_string();
        form.date = "03/02/2024".to_string();
        assert!(form.validate().is_err());

        form.date = "2024-02-03".to_string();
        form.time = "25:00".to_string();
        assert!(form.validate().is_err());

        form.time = "19:30".to_string();
        let booking = form.validate().expect("valid form");
        assert_eq!(booking.client_name, "Bruno");
        assert_eq!(booking.pax, "2 Pessoas");
        assert_eq!(booking.table_type, "Salão Principal");
    }
}
