use {
    coffer::{
        ledger::{Ledger, interface::LedgerInterface},
        models::{Account, Customer, Money},
        statement::StatementView,
    },
    criterion::{Criterion, criterion_group, criterion_main},
    std::hint::black_box,
};

fn account(number: &str, balance: i64) -> Account {
    Account::new(Customer::demo(), number.to_string()).with_balance(Money::from_minor_units(balance))
}

fn bench_ledger(c: &mut Criterion) {
    let ledger = Ledger::new();

    c.bench_function("deposit", |b| {
        let mut acc = account("0011000001", 0);
        b.iter(|| ledger.deposit(black_box(&mut acc), black_box(Money::from_minor_units(1))))
    });

    c.bench_function("transfer_round_trip", |b| {
        let mut source = account("0011000001", 1_000_000);
        let mut destination = account("0011000002", 0);
        b.iter(|| {
            let amount = black_box(Money::from_minor_units(250));
            ledger.transfer(&mut source, &mut destination, amount).ok();
            ledger.transfer(&mut destination, &mut source, amount).ok();
        })
    });

    c.bench_function("statement_json", |b| {
        let acc = account("0011000001", 123_456);
        b.iter(|| StatementView::from(black_box(&acc)).to_json())
    });
}

criterion_group!(benches, bench_ledger);
criterion_main!(benches);
