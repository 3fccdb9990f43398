//! End-to-end exchange flow tests
//!
//! Drives the full controller stack over a live ledger:
//! - Funded two-account trade settlement
//! - Self-match conservation
//! - Uncrossed book stability
//! - Multi-pair isolation
//! - Ledger event trail
//! - Supply conservation under randomized sessions (proptest)

use exchange::Exchange;
use ledger::LedgerEvent;
use types::errors::ExchangeError;
use types::ids::{AccountId, OrderId, TokenId};
use types::numeric::Amount;
use types::order::{OrderStatus, OrderType};

const STARTING_BALANCE: u64 = 1_000_000;

fn btc() -> TokenId {
    TokenId::new("BTC")
}

fn usdt() -> TokenId {
    TokenId::new("USDT")
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn funded_exchange(account_count: usize) -> (Exchange, Vec<AccountId>) {
    let mut exchange = Exchange::new();
    let accounts: Vec<AccountId> = (0..account_count).map(|_| AccountId::new()).collect();
    for account in &accounts {
        exchange
            .ledger_mut()
            .mint(&btc(), *account, Amount::new(STARTING_BALANCE))
            .unwrap();
        exchange
            .ledger_mut()
            .mint(&usdt(), *account, Amount::new(STARTING_BALANCE))
            .unwrap();
    }
    (exchange, accounts)
}

// ═══════════════════════════════════════════════════════════════════════════
// Trade settlement
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_crossed_book_settles_both_accounts() {
    init_tracing();
    let (mut exchange, accounts) = funded_exchange(2);
    let (buyer, seller) = (accounts[0], accounts[1]);

    let buy = exchange
        .create_order(
            OrderId::new(),
            OrderType::Buy,
            btc(),
            usdt(),
            Amount::new(100),
            Amount::new(200),
            buyer,
        )
        .unwrap();
    let sell = exchange
        .create_order(
            OrderId::new(),
            OrderType::Sell,
            usdt(),
            btc(),
            Amount::new(200),
            Amount::new(100),
            seller,
        )
        .unwrap();

    let matched = exchange
        .match_orders(btc(), usdt())
        .unwrap()
        .expect("book is crossed");
    assert_eq!(matched.traded_amount(), Amount::new(100));

    // Buyer: -100 BTC, +200 USDT
    assert_eq!(
        exchange.ledger().balance(&btc(), &buyer),
        Amount::new(999_900)
    );
    assert_eq!(
        exchange.ledger().balance(&usdt(), &buyer),
        Amount::new(1_000_200)
    );
    // Seller: +100 BTC, -200 USDT
    assert_eq!(
        exchange.ledger().balance(&btc(), &seller),
        Amount::new(1_000_100)
    );
    assert_eq!(
        exchange.ledger().balance(&usdt(), &seller),
        Amount::new(999_800)
    );

    for id in [buy.id, sell.id] {
        assert_eq!(
            exchange.get_order(&id).map(|o| o.status),
            Some(OrderStatus::Filled)
        );
    }
    assert!(exchange.get_orders(btc(), usdt()).is_empty());
}

#[test]
fn test_self_match_conserves_balances() {
    let (mut exchange, accounts) = funded_exchange(1);
    let trader = accounts[0];

    exchange
        .create_order(
            OrderId::new(),
            OrderType::Buy,
            btc(),
            usdt(),
            Amount::new(100),
            Amount::new(200),
            trader,
        )
        .unwrap();
    exchange
        .create_order(
            OrderId::new(),
            OrderType::Sell,
            usdt(),
            btc(),
            Amount::new(200),
            Amount::new(100),
            trader,
        )
        .unwrap();

    let matched = exchange
        .match_orders(btc(), usdt())
        .unwrap()
        .expect("self-match is legal");
    assert_eq!(matched.buy.sender, matched.sell.sender);

    // Both legs net to zero
    assert_eq!(
        exchange.ledger().balance(&btc(), &trader),
        Amount::new(STARTING_BALANCE)
    );
    assert_eq!(
        exchange.ledger().balance(&usdt(), &trader),
        Amount::new(STARTING_BALANCE)
    );
}

#[test]
fn test_uncrossed_book_is_stable() {
    let (mut exchange, accounts) = funded_exchange(2);
    let (buyer, seller) = (accounts[0], accounts[1]);

    // The buy demands 300 USDT but the sell asks 400
    exchange
        .create_order(
            OrderId::new(),
            OrderType::Buy,
            btc(),
            usdt(),
            Amount::new(100),
            Amount::new(300),
            buyer,
        )
        .unwrap();
    exchange
        .create_order(
            OrderId::new(),
            OrderType::Sell,
            usdt(),
            btc(),
            Amount::new(400),
            Amount::new(100),
            seller,
        )
        .unwrap();

    for _ in 0..3 {
        assert_eq!(exchange.match_orders(btc(), usdt()), Ok(None));
    }
    assert_eq!(exchange.get_orders(btc(), usdt()).len(), 2);
    assert_eq!(
        exchange.ledger().balance(&btc(), &buyer),
        Amount::new(STARTING_BALANCE)
    );
    assert_eq!(
        exchange.ledger().balance(&usdt(), &seller),
        Amount::new(STARTING_BALANCE)
    );
}

// ═══════════════════════════════════════════════════════════════════════════
// Pair isolation
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_pairs_settle_independently() {
    let (mut exchange, accounts) = funded_exchange(2);
    let (alice, bob) = (accounts[0], accounts[1]);
    let eth = TokenId::new("ETH");
    for account in [alice, bob] {
        exchange
            .ledger_mut()
            .mint(&eth, account, Amount::new(STARTING_BALANCE))
            .unwrap();
    }

    // One crossed pair on each book
    exchange
        .create_order(
            OrderId::new(),
            OrderType::Buy,
            btc(),
            usdt(),
            Amount::new(10),
            Amount::new(20),
            alice,
        )
        .unwrap();
    exchange
        .create_order(
            OrderId::new(),
            OrderType::Sell,
            usdt(),
            btc(),
            Amount::new(20),
            Amount::new(10),
            bob,
        )
        .unwrap();
    exchange
        .create_order(
            OrderId::new(),
            OrderType::Buy,
            eth.clone(),
            usdt(),
            Amount::new(5),
            Amount::new(15),
            bob,
        )
        .unwrap();
    exchange
        .create_order(
            OrderId::new(),
            OrderType::Sell,
            usdt(),
            eth.clone(),
            Amount::new(15),
            Amount::new(5),
            alice,
        )
        .unwrap();

    let settled = exchange.match_all_orders(btc(), usdt()).unwrap();
    assert_eq!(settled.len(), 1);
    // The ETH book is untouched by BTC matching
    assert_eq!(exchange.get_orders(eth.clone(), usdt()).len(), 2);

    let settled = exchange.match_all_orders(eth.clone(), usdt()).unwrap();
    assert_eq!(settled.len(), 1);
    assert!(exchange.get_orders(eth, usdt()).is_empty());
}

// ═══════════════════════════════════════════════════════════════════════════
// Ledger trail
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_settlement_appends_transfer_events() {
    let (mut exchange, accounts) = funded_exchange(2);
    let (buyer, seller) = (accounts[0], accounts[1]);
    exchange.ledger_mut().drain_events();

    exchange
        .create_order(
            OrderId::new(),
            OrderType::Buy,
            btc(),
            usdt(),
            Amount::new(100),
            Amount::new(200),
            buyer,
        )
        .unwrap();
    exchange
        .create_order(
            OrderId::new(),
            OrderType::Sell,
            usdt(),
            btc(),
            Amount::new(200),
            Amount::new(100),
            seller,
        )
        .unwrap();
    exchange.match_orders(btc(), usdt()).unwrap().unwrap();

    let events = exchange.ledger().events();
    assert_eq!(events.len(), 2);
    assert!(matches!(
        &events[0],
        LedgerEvent::Transferred { token, amount, .. }
            if *token == btc() && *amount == Amount::new(100)
    ));
    assert!(matches!(
        &events[1],
        LedgerEvent::Transferred { token, amount, .. }
            if *token == usdt() && *amount == Amount::new(200)
    ));
}

#[test]
fn test_session_conserves_supply() {
    let (mut exchange, accounts) = funded_exchange(3);
    let (alice, bob, carol) = (accounts[0], accounts[1], accounts[2]);

    exchange
        .create_order(
            OrderId::new(),
            OrderType::Buy,
            btc(),
            usdt(),
            Amount::new(500),
            Amount::new(900),
            alice,
        )
        .unwrap();
    exchange
        .create_order(
            OrderId::new(),
            OrderType::Buy,
            btc(),
            usdt(),
            Amount::new(300),
            Amount::new(700),
            bob,
        )
        .unwrap();
    let stale = exchange
        .create_order(
            OrderId::new(),
            OrderType::Sell,
            usdt(),
            btc(),
            Amount::new(2_000),
            Amount::new(600),
            carol,
        )
        .unwrap();
    exchange.cancel_order(&stale.id).unwrap();
    exchange
        .create_order(
            OrderId::new(),
            OrderType::Sell,
            usdt(),
            btc(),
            Amount::new(600),
            Amount::new(450),
            carol,
        )
        .unwrap();
    exchange
        .create_order(
            OrderId::new(),
            OrderType::Sell,
            usdt(),
            btc(),
            Amount::new(700),
            Amount::new(300),
            carol,
        )
        .unwrap();

    let settled = exchange.match_all_orders(btc(), usdt()).unwrap();
    assert_eq!(settled.len(), 2);

    for token in [btc(), usdt()] {
        assert_eq!(
            exchange.ledger().total_supply(&token),
            Amount::new(3 * STARTING_BALANCE)
        );
        let sum = [alice, bob, carol].iter().fold(Amount::zero(), |acc, account| {
            acc.checked_add(exchange.ledger().balance(&token, account))
                .unwrap()
        });
        assert_eq!(sum, Amount::new(3 * STARTING_BALANCE));
    }
}

#[test]
fn test_unfunded_account_cannot_place_orders() {
    let (mut exchange, _) = funded_exchange(1);
    let pauper = AccountId::new();

    let result = exchange.create_order(
        OrderId::new(),
        OrderType::Sell,
        usdt(),
        btc(),
        Amount::new(10),
        Amount::new(5),
        pauper,
    );
    assert_eq!(
        result,
        Err(ExchangeError::InsufficientBalance {
            token: usdt(),
            required: Amount::new(10),
            available: Amount::zero(),
        })
    );
    assert_eq!(exchange.order_count(), 0);
}

#[test]
fn test_reused_order_id_is_rejected() {
    let (mut exchange, accounts) = funded_exchange(2);
    let (buyer, seller) = (accounts[0], accounts[1]);

    let order = exchange
        .create_order(
            OrderId::new(),
            OrderType::Buy,
            btc(),
            usdt(),
            Amount::new(100),
            Amount::new(200),
            buyer,
        )
        .unwrap();

    let result = exchange.create_order(
        order.id,
        OrderType::Sell,
        usdt(),
        btc(),
        Amount::new(200),
        Amount::new(100),
        seller,
    );
    assert_eq!(
        result,
        Err(ExchangeError::DuplicateOrderId { order_id: order.id })
    );

    // The rejected call left the stored order and the book untouched
    assert_eq!(exchange.get_order(&order.id), Some(&order));
    assert_eq!(exchange.get_orders(btc(), usdt()).len(), 1);
    assert_eq!(exchange.order_count(), 1);
    assert_eq!(
        exchange.ledger().balance(&usdt(), &seller),
        Amount::new(STARTING_BALANCE)
    );
}

// ═══════════════════════════════════════════════════════════════════════════
// Randomized sessions
// ═══════════════════════════════════════════════════════════════════════════

mod fuzz {
    use super::*;
    use proptest::prelude::*;

    /// Quote amounts where every placed pair crosses.
    fn crossed_quotes() -> impl Strategy<Value = (u64, u64, u64, u64)> {
        (1u64..1_000, 1u64..1_000, 1u64..1_000).prop_flat_map(
            |(buy_in, buy_out, sell_out)| {
                (Just(buy_in), Just(buy_out), 1u64..=buy_out, Just(sell_out))
            },
        )
    }

    proptest! {
        /// Invariant: settlement never changes any token's total supply,
        /// and the two traders' holdings always sum to the minted total.
        #[test]
        fn fuzz_settlement_conserves_supply(
            quotes in proptest::collection::vec(crossed_quotes(), 1..20),
        ) {
            let (mut exchange, accounts) = funded_exchange(2);
            let (buyer, seller) = (accounts[0], accounts[1]);

            for (buy_in, buy_out, sell_in, sell_out) in quotes {
                exchange
                    .create_order(
                        OrderId::new(),
                        OrderType::Buy,
                        btc(),
                        usdt(),
                        Amount::new(buy_in),
                        Amount::new(buy_out),
                        buyer,
                    )
                    .unwrap();
                exchange
                    .create_order(
                        OrderId::new(),
                        OrderType::Sell,
                        usdt(),
                        btc(),
                        Amount::new(sell_in),
                        Amount::new(sell_out),
                        seller,
                    )
                    .unwrap();
            }

            let settled = exchange.match_all_orders(btc(), usdt()).unwrap();
            prop_assert!(!settled.is_empty());

            for token in [btc(), usdt()] {
                let total = exchange
                    .ledger()
                    .balance(&token, &buyer)
                    .checked_add(exchange.ledger().balance(&token, &seller))
                    .unwrap();
                prop_assert_eq!(total, Amount::new(2 * STARTING_BALANCE));
                prop_assert_eq!(
                    exchange.ledger().total_supply(&token),
                    Amount::new(2 * STARTING_BALANCE)
                );
            }
        }
    }
}
