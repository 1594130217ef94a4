use crate::world::BrokerID;
use prototypes::{try_prototype, ItemID, Money};
use serde::de::Error;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Layout version written at the head of each persisted ledger entry.
/// Reading any other version is an error, not a silent reinterpretation.
const LEDGER_VERSION: u32 = 0;

/// One line of a broker's commodity ledger: how much of one kind of good the
/// broker holds, the unit price in each trade direction and the volume caps.
///
/// `sell_price_per`/`sell_limit` apply when the broker sells to a player,
/// `buy_price_per`/`buy_limit` when it buys from one. A price of zero turns
/// that direction off. A limit of zero means no cap was configured.
#[derive(Clone, Debug)]
pub struct CommodityLedgerEntry {
    kind: Option<ItemID>,
    kind_name: String,
    label: String,
    icon: u32,
    broker: BrokerID,

    pub sell_price_per: Money,
    pub buy_price_per: Money,
    pub sell_limit: u32,
    pub buy_limit: u32,
    pub stock: u32,
}

impl CommodityLedgerEntry {
    /// Opens a fresh ledger line for `kind`, holding `amount` units. Prices
    /// and limits start unset until the broker is configured.
    pub fn new(kind: ItemID, broker: BrokerID, amount: u32) -> Self {
        let (kind_name, label, icon) = match try_prototype(kind) {
            Some(proto) => (proto.name.clone(), proto.label.clone(), proto.icon),
            None => {
                log::warn!("opening ledger entry for unknown commodity {:?}", kind);
                (format!("{:?}", kind), format!("{:?}", kind), 0)
            }
        };

        Self {
            kind: Some(kind),
            kind_name,
            label,
            icon,
            broker,
            sell_price_per: Money::ZERO,
            buy_price_per: Money::ZERO,
            sell_limit: 0,
            buy_limit: 0,
            stock: amount,
        }
    }

    /// None when the persisted commodity name no longer resolves
    pub fn kind(&self) -> Option<ItemID> {
        self.kind
    }

    pub fn kind_name(&self) -> &str {
        &self.kind_name
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn icon(&self) -> u32 {
        self.icon
    }

    pub fn broker(&self) -> BrokerID {
        self.broker
    }

    /// Units a player could buy right now: bounded by stock, and by the
    /// configured sell cap when one is set.
    pub fn actual_sell_limit(&self) -> u32 {
        if self.sell_limit == 0 {
            return self.stock;
        }
        self.stock.min(self.sell_limit)
    }

    /// Units a player could sell right now. When the broker's funds are known
    /// and too small to pay for a full restock, the bound is how many units
    /// the funds cover, otherwise it is the room left under the buy cap.
    pub fn actual_buy_limit(&self, funds: Option<Money>) -> u32 {
        if let Some(funds) = funds {
            let full_restock = self.buy_price_per.saturating_mul(self.buy_limit as i64);
            if self.buy_price_per > Money::ZERO && funds < full_restock {
                return (funds / self.buy_price_per).max(0) as u32;
            }
        }
        self.buy_limit.saturating_sub(self.stock)
    }

    /// Whether a player may buy `amount` units from the broker
    pub fn player_can_buy(&self, amount: u32) -> bool {
        (self.sell_limit == 0 || amount <= self.actual_sell_limit())
            && self.stock > 0
            && self.sell_price_per > Money::ZERO
    }

    /// Whether a player may sell `amount` units to the broker. `funds` is the
    /// broker's bank, None meaning the broker is gone and nothing can be sold.
    ///
    /// The affordability check is against a single unit's price. Callers
    /// committing a bulk sale must still bound the amount by
    /// [`actual_buy_limit`](Self::actual_buy_limit).
    pub fn player_can_sell(&self, amount: u32, funds: Option<Money>) -> bool {
        let Some(funds) = funds else {
            return false;
        };
        (self.buy_limit == 0 || amount <= self.actual_buy_limit(Some(funds)))
            && self.buy_price_per > Money::ZERO
            && self.buy_price_per <= funds
    }
}

impl Serialize for CommodityLedgerEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (
            LEDGER_VERSION,
            &self.kind_name,
            &self.label,
            self.broker,
            self.icon,
            self.sell_price_per,
            self.buy_price_per,
            self.buy_limit,
            self.sell_limit,
            self.stock,
        )
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CommodityLedgerEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (
            version,
            kind_name,
            label,
            broker,
            icon,
            sell_price_per,
            buy_price_per,
            buy_limit,
            sell_limit,
            stock,
        ): (u32, String, String, BrokerID, u32, Money, Money, u32, u32, u32) =
            Deserialize::deserialize(deserializer)?;

        if version != LEDGER_VERSION {
            return Err(D::Error::custom(format!(
                "unknown ledger entry version {} (expected {})",
                version, LEDGER_VERSION
            )));
        }

        // The id is the hash of the name, so re-hashing finds the kind again
        let id = ItemID::new(&kind_name);
        let kind = if try_prototype(id).is_some() {
            Some(id)
        } else {
            log::warn!("ledger entry for unknown commodity name {:?}", kind_name);
            None
        };

        Ok(Self {
            kind,
            kind_name,
            label,
            icon,
            broker,
            sell_price_per,
            buy_price_per,
            sell_limit,
            buy_limit,
            stock,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::saveload::{Bincode, Encoder};
    use prototypes::Money;

    fn entry(stock: u32, sell_limit: u32, buy_limit: u32) -> CommodityLedgerEntry {
        CommodityLedgerEntry {
            kind: None,
            kind_name: "test-good".to_string(),
            label: "Test Good".to_string(),
            icon: 0,
            broker: BrokerID::default(),
            sell_price_per: Money::ZERO,
            buy_price_per: Money::ZERO,
            sell_limit,
            buy_limit,
            stock,
        }
    }

    #[test]
    fn sell_limit_props() {
        fn prop(stock: u32, sell_limit: u32) -> bool {
            let e = entry(stock, sell_limit, 0);
            let lim = e.actual_sell_limit();
            if sell_limit == 0 {
                lim == stock
            } else {
                lim == stock.min(sell_limit)
            }
        }
        quickcheck::quickcheck(prop as fn(u32, u32) -> bool);
    }

    #[test]
    fn buy_limit_never_exceeds_funds() {
        fn prop(stock: u16, buy_limit: u16, price_b: u16, funds_b: u32) -> bool {
            let mut e = entry(stock as u32, 0, buy_limit as u32);
            e.buy_price_per = Money::new_bucks(price_b as i64 + 1);
            let funds = Money::new_bucks(funds_b as i64);

            let lim = e.actual_buy_limit(Some(funds));
            if funds < e.buy_price_per * e.buy_limit as i64 {
                e.buy_price_per * lim as i64 <= funds
            } else {
                lim == (buy_limit as u32).saturating_sub(stock as u32)
            }
        }
        quickcheck::quickcheck(prop as fn(u16, u16, u16, u32) -> bool);
    }

    #[test]
    fn buy_limit_unknown_funds_ignores_bank() {
        let mut e = entry(80, 0, 100);
        e.buy_price_per = Money::new_bucks(10);
        assert_eq!(e.actual_buy_limit(None), 20);

        let mut full = entry(120, 0, 100);
        full.buy_price_per = Money::new_bucks(10);
        assert_eq!(full.actual_buy_limit(None), 0);
    }

    #[test]
    fn cannot_buy_without_stock_or_price() {
        fn prop(amount: u32, sell_limit: u32) -> bool {
            let mut empty = entry(0, sell_limit, 0);
            empty.sell_price_per = Money::new_bucks(5);

            let mut free = entry(50, sell_limit, 0);
            free.sell_price_per = Money::ZERO;

            !empty.player_can_buy(amount) && !free.player_can_buy(amount)
        }
        quickcheck::quickcheck(prop as fn(u32, u32) -> bool);
    }

    #[test]
    fn cannot_sell_when_unaffordable() {
        let mut e = entry(0, 0, 100);
        e.buy_price_per = Money::new_bucks(10);

        assert!(!e.player_can_sell(1, Some(Money::new_bucks(9))));
        assert!(e.player_can_sell(1, Some(Money::new_bucks(10))));
        assert!(!e.player_can_sell(1, None));

        e.buy_price_per = Money::ZERO;
        assert!(!e.player_can_sell(1, Some(Money::new_bucks(1000))));
    }

    #[test]
    fn extreme_caps_do_not_overflow() {
        let mut e = entry(0, 0, u32::MAX);
        e.buy_price_per = Money::new_inner(i64::MAX / 2);

        // the full-restock cost saturates instead of wrapping negative
        assert_eq!(e.actual_buy_limit(Some(Money::new_bucks(1))), 0);
    }

    /// Pins the external v0 byte layout: version, kind name, label, broker,
    /// icon, sell price, buy price, buy limit, sell limit, stock.
    #[test]
    fn persisted_ledger_layout() {
        let mut e = entry(9, 4, 7);
        e.sell_price_per = Money::new_bucks(3);
        e.buy_price_per = Money::new_bucks(2);

        let got = Bincode::encode(&e).unwrap();
        let expected = Bincode::encode(&(
            0u32,
            "test-good",
            "Test Good",
            BrokerID::default(),
            0u32,
            Money::new_bucks(3),
            Money::new_bucks(2),
            7u32,
            4u32,
            9u32,
        ))
        .unwrap();
        assert_eq!(got, expected);

        let back: CommodityLedgerEntry = Bincode::decode(&got).unwrap();
        assert_eq!(back.stock, 9);
        assert_eq!(back.sell_limit, 4);
        assert_eq!(back.buy_limit, 7);
        assert_eq!(back.icon(), 0);
        assert_eq!(back.broker(), BrokerID::default());
    }

    #[test]
    fn capped_sales_scenario() {
        let mut e = entry(50, 20, 0);
        e.sell_price_per = Money::new_bucks(5);

        assert_eq!(e.actual_sell_limit(), 20);
        assert!(e.player_can_buy(15));
        assert!(!e.player_can_buy(25));
    }

    #[test]
    fn underfunded_purchases_scenario() {
        let mut e = entry(80, 0, 100);
        e.buy_price_per = Money::new_bucks(10);

        // 100 * 10$ would be 1000$, the broker only has 150$
        assert_eq!(e.actual_buy_limit(Some(Money::new_bucks(150))), 15);
        assert!(e.player_can_sell(15, Some(Money::new_bucks(150))));
        assert!(!e.player_can_sell(16, Some(Money::new_bucks(150))));
    }
}
