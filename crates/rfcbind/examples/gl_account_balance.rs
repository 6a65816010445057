// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::uninlined_format_args)] // Example readability over pedantic
#![allow(clippy::missing_panics_doc)] // Examples panic on failure
#![allow(clippy::too_many_lines)] // Example code

//! G/L Account Balance - BAPI_GL_GETGLACCPERIODBALANCES
//!
//! Maps the input and output parameters of the period balance BAPI, runs the
//! call against an in-memory function module and prints the balances.
//!
//! Run with: cargo run --package rfcbind --example gl_account_balance
//! Set RUST_LOG=debug to see the marshaling trace.

use bigdecimal::BigDecimal;
use rfcbind::container::{from_sap, to_sap, DataContainer, MemoryContainer, RfcResult};
use rfcbind::{field, Alignment, BapiReturn, FunctionCall, RfcMapper, SharedMapper, WireType};

#[derive(Debug, Default)]
struct GlBalanceInput {
    company_code: Option<String>,
    gl_account: Option<String>,
    fiscal_year: i32,
    currency_type: Option<String>,
}

#[derive(Debug, Default)]
struct GlBalanceDetail {
    company_code: Option<String>,
    gl_account: Option<String>,
    fiscal_year: i32,
    fiscal_period: i32,
    total_debit: BigDecimal,
    total_credit: BigDecimal,
    monthly_sales: BigDecimal,
    currency: Option<String>,
}

#[derive(Debug, Default)]
struct GlBalanceOutput {
    detail: Vec<GlBalanceDetail>,
    bapi_return: BapiReturn,
}

fn build_mapper() -> rfcbind::Result<RfcMapper> {
    let mut mapper = RfcMapper::new();
    mapper.map_bapi_return()?;

    let mut input = mapper.register::<GlBalanceInput>();
    input
        .field(field!(GlBalanceInput, company_code))?
        .wire_name("COMPANYCODE")
        .wire_type(WireType::Char)
        .length(4);
    input
        .field(field!(GlBalanceInput, gl_account))?
        .wire_name("GLACCT")
        .wire_type(WireType::Char)
        .length(10)
        .alignment(Alignment::Right, '0');
    input
        .field(field!(GlBalanceInput, fiscal_year))?
        .wire_name("FISCALYEAR")
        .wire_type(WireType::Int);
    input
        .field(field!(GlBalanceInput, currency_type))?
        .wire_name("CURRENCYTYPE")
        .wire_type(WireType::Char)
        .length(2);

    let mut detail = mapper.register::<GlBalanceDetail>();
    let chars = [
        (field!(GlBalanceDetail, company_code), "COMP_CODE", 4),
        (field!(GlBalanceDetail, gl_account), "GL_ACCOUNT", 10),
        (field!(GlBalanceDetail, currency), "CURRENCY", 10),
    ];
    for (selector, wire_name, length) in chars {
        detail
            .field(selector)?
            .wire_name(wire_name)
            .wire_type(WireType::Char)
            .length(length);
    }
    let ints = [
        (field!(GlBalanceDetail, fiscal_year), "FISC_YEAR"),
        (field!(GlBalanceDetail, fiscal_period), "FIS_PERIOD"),
    ];
    for (selector, wire_name) in ints {
        detail.field(selector)?.wire_name(wire_name).wire_type(WireType::Int);
    }
    let amounts = [
        (field!(GlBalanceDetail, total_debit), "DEBITS_PER"),
        (field!(GlBalanceDetail, total_credit), "CREDIT_PER"),
        (field!(GlBalanceDetail, monthly_sales), "PER_SALES"),
    ];
    for (selector, wire_name) in amounts {
        detail.field(selector)?.wire_name(wire_name).wire_type(WireType::Bcd);
    }

    let mut output = mapper.register::<GlBalanceOutput>();
    output
        .table(field!(GlBalanceOutput, detail))?
        .wire_name("ACCOUNT_BALANCES");
    output
        .structure(field!(GlBalanceOutput, bapi_return))?
        .wire_name("RETURN");

    Ok(mapper)
}

/// Stand-in for the remote function module.
fn invoke_remote(params: &dyn DataContainer) -> RfcResult<()> {
    let mut buffer = [0u16; 4];
    params.get_chars("COMPANYCODE", &mut buffer)?;
    let company = from_sap(&buffer);
    let mut buffer = [0u16; 10];
    params.get_chars("GLACCT", &mut buffer)?;
    let account = from_sap(&buffer);
    let year = params.get_int("FISCALYEAR")?;

    let balances = params.get_table("ACCOUNT_BALANCES")?;
    let postings = [
        ("12500.00", "3100.40", "9399.60"),
        ("8020.15", "8020.15", "0.00"),
        ("410.99", "17000.00", "-16589.01"),
    ];
    for (period, (debit, credit, sales)) in (1..).zip(postings) {
        let row = balances.append_row()?;
        row.set_chars("COMP_CODE", &to_sap(&company))?;
        row.set_chars("GL_ACCOUNT", &to_sap(&account))?;
        row.set_int("FISC_YEAR", year)?;
        row.set_int("FIS_PERIOD", period)?;
        row.set_string("DEBITS_PER", &to_sap(debit))?;
        row.set_string("CREDIT_PER", &to_sap(credit))?;
        row.set_string("PER_SALES", &to_sap(sales))?;
        row.set_chars("CURRENCY", &to_sap("EUR"))?;
    }
    params.get_structure("RETURN")?.set_chars("TYPE", &to_sap("S"))?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    println!("=== rfcbind G/L Account Balance ===\n");

    // 1. Shared mapper, registered once per process
    let shared = SharedMapper::new(build_mapper()?);
    println!("[OK] Mapper ready ({} record types)", shared.read().len());

    // 2. Encode input
    let call = FunctionCall::new("BAPI_GL_GETGLACCPERIODBALANCES", &shared);
    let params = MemoryContainer::new();
    let input = GlBalanceInput {
        company_code: Some("1000".into()),
        gl_account: Some("476000".into()),
        fiscal_year: 2023,
        currency_type: Some("10".into()),
    };
    call.set_input(&params, Some(&input))?;
    println!("[OK] Input written: {:?}", params.field_names());

    // 3. Remote call
    invoke_remote(&params)?;
    println!("[OK] {} returned\n", call.name());

    // 4. Decode output
    let output: GlBalanceOutput = call.get_output(&params)?;
    if output.bapi_return.is_error() {
        println!("[ERROR] {}", output.bapi_return);
        return Ok(());
    }

    println!("{:<8} {:>6} {:>14} {:>14} {:>14}", "Company", "Period", "Debit", "Credit", "Balance");
    println!("{}", "-".repeat(60));
    for line in &output.detail {
        println!(
            "{:<8} {:>6} {:>14} {:>14} {:>14} {}",
            line.company_code.as_deref().unwrap_or(""),
            line.fiscal_period,
            line.total_debit.to_string(),
            line.total_credit.to_string(),
            line.monthly_sales.to_string(),
            line.currency.as_deref().map_or("", str::trim_end),
        );
    }
    Ok(())
}
