use loanscope_core::{Record, RecordId};

/// A record carrying every scoring feature plus the demographic flags
pub fn scorable_record(id: i64) -> Record {
    Record::new(RecordId(id))
        .with_field("checking_status", "A11")
        .with_field("credit_amount", 1169i64)
        .with_field("credit_history", "A34")
        .with_field("debtors_guarantors", "A101")
        .with_field("duration_months", 6i64)
        .with_field("foreign_worker", "A201")
        .with_field("housing", "A152")
        .with_field("installment_plans", "A143")
        .with_field("installment_rate", 4i64)
        .with_field("job", "A173")
        .with_field("number_existing_credits", 2i64)
        .with_field("number_people_liable", 1i64)
        .with_field("present_employment_since", "A75")
        .with_field("present_residence_since", 4i64)
        .with_field("property", "A121")
        .with_field("purpose", "A43")
        .with_field("savings_account", "A65")
        .with_field("telephone", "A192")
        .with_field("gender", "male")
        .with_field("age_over_forty", true)
}
