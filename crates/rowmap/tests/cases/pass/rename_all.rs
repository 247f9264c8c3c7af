// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `rename_all` with explicit overrides.

use rowmap::{Record, header};

#[derive(Record, Default)]
#[record(rename_all = "PascalCase")]
pub struct Invoice {
    pub invoice_id: u64,
    pub total_amount: f64,
    #[tag(csv = "due")]
    pub due_date: String,
}

fn main() {
    assert_eq!(header::<Invoice>("csv").unwrap(), ["InvoiceId", "TotalAmount", "due"]);
}
