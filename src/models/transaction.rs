use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::mapping::{Field, Record};
use crate::types::{parse_amount, parse_integer, parse_optional_integer, parse_timestamp, FieldValue, TransactionId};

/// A single payment transaction as imported from, and exported to, a CSV file.
///
/// Only `transaction_id` is mandatory. Every other column may be absent from an upload, in
/// which case the field keeps its default (empty text or `None`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transaction {
    pub transaction_id: TransactionId,
    pub request_id: Option<i64>,
    pub terminal_id: String,
    pub partner_object_id: Option<i64>,
    pub amount_total: Option<Decimal>,
    pub amount_original: Option<Decimal>,
    pub commission_ps: Option<Decimal>,
    pub commission_client: Option<Decimal>,
    pub commission_provider: Option<Decimal>,
    pub date_input: Option<NaiveDateTime>,
    /// Posting time; the date part is what export date filters compare against.
    pub date_post: Option<NaiveDateTime>,
    pub status: String,
    pub payment_type: String,
    pub payment_number: String,
    pub service_id: Option<i64>,
    pub service: String,
    pub payee_id: Option<i64>,
    pub payee_name: String,
    pub payee_bank_mfo: Option<i64>,
    pub payee_bank_account: String,
    pub payment_narrative: String
}

impl Transaction {
    #[cfg(test)]
    pub fn new(transaction_id: TransactionId, status: &str) -> Self {
        Self {
            transaction_id,
            status: status.to_string(),
            ..Self::default()
        }
    }
}

impl Record for Transaction {
    const FIELDS: &'static [Field<Self>] = &[
        Field {
            name: "TransactionId",
            required: true,
            parse: |record, value| {
                record.transaction_id = parse_integer(value)?;
                Ok(())
            },
            value: |record| FieldValue::Integer(Some(record.transaction_id))
        },
        Field {
            name: "RequestId",
            required: false,
            parse: |record, value| {
                record.request_id = parse_optional_integer(value)?;
                Ok(())
            },
            value: |record| FieldValue::Integer(record.request_id)
        },
        Field {
            name: "TerminalId",
            required: false,
            parse: |record, value| {
                record.terminal_id = value.to_string();
                Ok(())
            },
            value: |record| FieldValue::Text(&record.terminal_id)
        },
        Field {
            name: "PartnerObjectId",
            required: false,
            parse: |record, value| {
                record.partner_object_id = parse_optional_integer(value)?;
                Ok(())
            },
            value: |record| FieldValue::Integer(record.partner_object_id)
        },
        Field {
            name: "AmountTotal",
            required: false,
            parse: |record, value| {
                record.amount_total = parse_amount(value)?;
                Ok(())
            },
            value: |record| FieldValue::Amount(record.amount_total)
        },
        Field {
            name: "AmountOriginal",
            required: false,
            parse: |record, value| {
                record.amount_original = parse_amount(value)?;
                Ok(())
            },
            value: |record| FieldValue::Amount(record.amount_original)
        },
        Field {
            name: "CommissionPS",
            required: false,
            parse: |record, value| {
                record.commission_ps = parse_amount(value)?;
                Ok(())
            },
            value: |record| FieldValue::Amount(record.commission_ps)
        },
        Field {
            name: "CommissionClient",
            required: false,
            parse: |record, value| {
                record.commission_client = parse_amount(value)?;
                Ok(())
            },
            value: |record| FieldValue::Amount(record.commission_client)
        },
        Field {
            name: "CommissionProvider",
            required: false,
            parse: |record, value| {
                record.commission_provider = parse_amount(value)?;
                Ok(())
            },
            value: |record| FieldValue::Amount(record.commission_provider)
        },
        Field {
            name: "DateInput",
            required: false,
            parse: |record, value| {
                record.date_input = parse_timestamp(value)?;
                Ok(())
            },
            value: |record| FieldValue::Timestamp(record.date_input)
        },
        Field {
            name: "DatePost",
            required: false,
            parse: |record, value| {
                record.date_post = parse_timestamp(value)?;
                Ok(())
            },
            value: |record| FieldValue::Timestamp(record.date_post)
        },
        Field {
            name: "Status",
            required: false,
            parse: |record, value| {
                record.status = value.to_string();
                Ok(())
            },
            value: |record| FieldValue::Text(&record.status)
        },
        Field {
            name: "PaymentType",
            required: false,
            parse: |record, value| {
                record.payment_type = value.to_string();
                Ok(())
            },
            value: |record| FieldValue::Text(&record.payment_type)
        },
        Field {
            name: "PaymentNumber",
            required: false,
            parse: |record, value| {
                record.payment_number = value.to_string();
                Ok(())
            },
            value: |record| FieldValue::Text(&record.payment_number)
        },
        Field {
            name: "ServiceId",
            required: false,
            parse: |record, value| {
                record.service_id = parse_optional_integer(value)?;
                Ok(())
            },
            value: |record| FieldValue::Integer(record.service_id)
        },
        Field {
            name: "Service",
            required: false,
            parse: |record, value| {
                record.service = value.to_string();
                Ok(())
            },
            value: |record| FieldValue::Text(&record.service)
        },
        Field {
            name: "PayeeId",
            required: false,
            parse: |record, value| {
                record.payee_id = parse_optional_integer(value)?;
                Ok(())
            },
            value: |record| FieldValue::Integer(record.payee_id)
        },
        Field {
            name: "PayeeName",
            required: false,
            parse: |record, value| {
                record.payee_name = value.to_string();
                Ok(())
            },
            value: |record| FieldValue::Text(&record.payee_name)
        },
        Field {
            name: "PayeeBankMfo",
            required: false,
            parse: |record, value| {
                record.payee_bank_mfo = parse_optional_integer(value)?;
                Ok(())
            },
            value: |record| FieldValue::Integer(record.payee_bank_mfo)
        },
        Field {
            name: "PayeeBankAccount",
            required: false,
            parse: |record, value| {
                record.payee_bank_account = value.to_string();
                Ok(())
            },
            value: |record| FieldValue::Text(&record.payee_bank_account)
        },
        Field {
            name: "PaymentNarrative",
            required: false,
            parse: |record, value| {
                record.payment_narrative = value.to_string();
                Ok(())
            },
            value: |record| FieldValue::Text(&record.payment_narrative)
        }
    ];
}
