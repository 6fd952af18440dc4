//! Item effects.
//!
//! The caller removes the item from the user's inventory before resolving it,
//! so an item is spent even when its effect fizzles.

use super::ItemKind;
use crate::events::{FizzleReason, GameEvent};
use crate::round::TurnResult;
use crate::table::{Seat, Table};
use rand::Rng;

/// Resolve `item` for `user`. Returns the turn signal the item raises, if any.
pub fn resolve_item<R: Rng>(
    table: &mut Table,
    user: Seat,
    item: ItemKind,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) -> Option<TurnResult> {
    events.push(GameEvent::ItemUsed { seat: user, item });
    tracing::debug!(seat = %user, %item, "item used");
    resolve(table, user, item, rng, events, false)
}

fn resolve<R: Rng>(
    table: &mut Table,
    user: Seat,
    item: ItemKind,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
    stolen: bool,
) -> Option<TurnResult> {
    let fizzle = |events: &mut Vec<GameEvent>, reason: FizzleReason| -> Option<TurnResult> {
        events.push(GameEvent::ItemFizzled {
            seat: user,
            item,
            reason,
        });
        None
    };

    match item {
        ItemKind::Phone | ItemKind::BurnerPhone => {
            let count = table.magazine.count();
            if count == 0 {
                return fizzle(events, FizzleReason::EmptyMagazine);
            }
            let index = rng.gen_range(0..count);
            if let Some(shell) = table.magazine.peek_at(index) {
                events.push(GameEvent::ShellRevealed {
                    seat: user,
                    chamber: index + 1,
                    shell,
                });
            }
            None
        }
        ItemKind::BeerCan => {
            let Ok(shell) = table.magazine.pop_front() else {
                return fizzle(events, FizzleReason::EmptyMagazine);
            };
            events.push(GameEvent::ShellEjected { seat: user, shell });
            if table.magazine.is_empty() {
                events.push(GameEvent::RoundEndedByBeer);
                Some(TurnResult::RoundEndedByBeer)
            } else {
                None
            }
        }
        ItemKind::Magnifier => match table.magazine.peek_front() {
            Some(shell) => {
                events.push(GameEvent::ShellRevealed {
                    seat: user,
                    chamber: 1,
                    shell,
                });
                None
            }
            None => fizzle(events, FizzleReason::EmptyMagazine),
        },
        ItemKind::Handcuffs => {
            events.push(GameEvent::HandcuffsApplied {
                target: user.other(),
            });
            Some(TurnResult::SkipOpponentTurn)
        }
        ItemKind::Cigarettes => {
            let total = table.contestant_mut(user).gain_lives(1);
            events.push(GameEvent::LifeGained {
                seat: user,
                amount: 1,
                total,
            });
            None
        }
        ItemKind::Saw => {
            events.push(GameEvent::SawPrimed { seat: user });
            Some(TurnResult::DoubleDamageNextShot)
        }
        ItemKind::DivineWaiver => {
            events.push(GameEvent::ItemReturned { seat: user, item });
            None
        }
        ItemKind::Adrenaline => {
            if stolen {
                return fizzle(events, FizzleReason::ChainedAdrenaline);
            }
            let victim = user.other();
            let Ok(taken) = table.contestant_mut(victim).items.take_random(rng) else {
                return fizzle(events, FizzleReason::NothingToSteal);
            };
            events.push(GameEvent::ItemStolen {
                thief: user,
                victim,
                item: taken,
            });
            resolve(table, user, taken, rng, events, true)
        }
        ItemKind::Inverter => match table.magazine.invert_front() {
            Some(_) => {
                events.push(GameEvent::ShellInverted { seat: user });
                None
            }
            None => fizzle(events, FizzleReason::EmptyMagazine),
        },
        ItemKind::ExpiredMedicine => {
            let contestant = table.contestant_mut(user);
            if rng.gen_bool(0.5) {
                let total = contestant.gain_lives(2);
                events.push(GameEvent::LifeGained {
                    seat: user,
                    amount: 2,
                    total,
                });
            } else {
                let remaining = contestant.lose_lives(1);
                events.push(GameEvent::LifeLost {
                    seat: user,
                    amount: 1,
                    remaining,
                });
            }
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Rules;
    use crate::magazine::{ShellKind, ShellMagazine};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use ShellKind::{Blank, Live};

    fn setup(shells: Vec<ShellKind>) -> (Table, StdRng, Vec<GameEvent>) {
        let mut table = Table::new(&Rules::default());
        table.player.lives = 3;
        table.opponent.lives = 3;
        table.magazine = ShellMagazine::from_shells(shells);
        (table, StdRng::seed_from_u64(99), Vec::new())
    }

    #[test]
    fn test_phone_reveals_a_real_chamber() {
        let shells = vec![Live, Blank, Blank, Live, Blank, Live];
        for seed in 0..20 {
            let (mut table, _, mut events) = setup(shells.clone());
            let mut rng = StdRng::seed_from_u64(seed);
            let signal = resolve_item(&mut table, Seat::Player, ItemKind::Phone, &mut rng, &mut events);
            assert_eq!(signal, None);
            let revealed = events.iter().find_map(|e| match e {
                GameEvent::ShellRevealed { chamber, shell, .. } => Some((*chamber, *shell)),
                _ => None,
            });
            let (chamber, shell) = revealed.expect("phone should reveal a shell");
            assert!((1..=6).contains(&chamber));
            assert_eq!(shells[chamber - 1], shell);
            assert_eq!(table.magazine.count(), 6);
        }
    }

    #[test]
    fn test_phone_on_empty_fizzles() {
        let (mut table, mut rng, mut events) = setup(vec![]);
        resolve_item(&mut table, Seat::Player, ItemKind::BurnerPhone, &mut rng, &mut events);
        assert!(events.contains(&GameEvent::ItemFizzled {
            seat: Seat::Player,
            item: ItemKind::BurnerPhone,
            reason: FizzleReason::EmptyMagazine,
        }));
    }

    #[test]
    fn test_beer_ejects_without_firing() {
        let (mut table, mut rng, mut events) = setup(vec![Live, Blank]);
        let signal = resolve_item(&mut table, Seat::Player, ItemKind::BeerCan, &mut rng, &mut events);
        assert_eq!(signal, None);
        assert_eq!(table.magazine.count(), 1);
        assert_eq!(table.magazine.peek_front(), Some(Blank));
        assert_eq!(table.player.lives, 3);
        assert_eq!(table.opponent.lives, 3);
    }

    #[test]
    fn test_beer_on_last_shell_ends_round() {
        let (mut table, mut rng, mut events) = setup(vec![Live]);
        let signal = resolve_item(&mut table, Seat::Opponent, ItemKind::BeerCan, &mut rng, &mut events);
        assert_eq!(signal, Some(TurnResult::RoundEndedByBeer));
        assert!(table.magazine.is_empty());
    }

    #[test]
    fn test_beer_on_empty_fizzles() {
        let (mut table, mut rng, mut events) = setup(vec![]);
        let signal = resolve_item(&mut table, Seat::Player, ItemKind::BeerCan, &mut rng, &mut events);
        assert_eq!(signal, None);
    }

    #[test]
    fn test_magnifier_reveals_front() {
        let (mut table, mut rng, mut events) = setup(vec![Blank, Live]);
        resolve_item(&mut table, Seat::Player, ItemKind::Magnifier, &mut rng, &mut events);
        assert!(events.contains(&GameEvent::ShellRevealed {
            seat: Seat::Player,
            chamber: 1,
            shell: Blank,
        }));
    }

    #[test]
    fn test_handcuffs_signal_skip() {
        let (mut table, mut rng, mut events) = setup(vec![Live]);
        let signal = resolve_item(&mut table, Seat::Player, ItemKind::Handcuffs, &mut rng, &mut events);
        assert_eq!(signal, Some(TurnResult::SkipOpponentTurn));
        assert!(events.contains(&GameEvent::HandcuffsApplied {
            target: Seat::Opponent
        }));
    }

    #[test]
    fn test_cigarettes_heal_user() {
        let (mut table, mut rng, mut events) = setup(vec![]);
        resolve_item(&mut table, Seat::Opponent, ItemKind::Cigarettes, &mut rng, &mut events);
        assert_eq!(table.opponent.lives, 4);
        assert_eq!(table.player.lives, 3);
    }

    #[test]
    fn test_saw_signals_double_damage() {
        let (mut table, mut rng, mut events) = setup(vec![Live]);
        let signal = resolve_item(&mut table, Seat::Player, ItemKind::Saw, &mut rng, &mut events);
        assert_eq!(signal, Some(TurnResult::DoubleDamageNextShot));
    }

    #[test]
    fn test_divine_waiver_does_nothing() {
        let (mut table, mut rng, mut events) = setup(vec![Live, Blank]);
        let signal = resolve_item(&mut table, Seat::Player, ItemKind::DivineWaiver, &mut rng, &mut events);
        assert_eq!(signal, None);
        assert_eq!(table.magazine.count(), 2);
        assert_eq!(table.player.lives, 3);
    }

    #[test]
    fn test_inverter_twice_restores() {
        let (mut table, mut rng, mut events) = setup(vec![Live, Blank]);
        resolve_item(&mut table, Seat::Player, ItemKind::Inverter, &mut rng, &mut events);
        assert_eq!(table.magazine.peek_front(), Some(Blank));
        resolve_item(&mut table, Seat::Player, ItemKind::Inverter, &mut rng, &mut events);
        assert_eq!(table.magazine.peek_front(), Some(Live));
        assert_eq!(table.magazine.peek_at(1), Some(Blank));
    }

    #[test]
    fn test_adrenaline_with_nothing_to_steal() {
        let (mut table, mut rng, mut events) = setup(vec![Live]);
        let signal = resolve_item(&mut table, Seat::Player, ItemKind::Adrenaline, &mut rng, &mut events);
        assert_eq!(signal, None);
        assert!(events.contains(&GameEvent::ItemFizzled {
            seat: Seat::Player,
            item: ItemKind::Adrenaline,
            reason: FizzleReason::NothingToSteal,
        }));
        assert_eq!(table.player.lives, 3);
    }

    #[test]
    fn test_adrenaline_steals_and_applies() {
        let (mut table, mut rng, mut events) = setup(vec![Live]);
        table.opponent.items.add(ItemKind::Cigarettes).unwrap();
        let signal = resolve_item(&mut table, Seat::Player, ItemKind::Adrenaline, &mut rng, &mut events);
        assert_eq!(signal, None);
        assert!(table.opponent.items.is_empty());
        assert_eq!(table.player.lives, 4);
        assert_eq!(table.opponent.lives, 3);
    }

    #[test]
    fn test_adrenaline_propagates_stolen_signal() {
        let (mut table, mut rng, mut events) = setup(vec![Live]);
        table.player.items.add(ItemKind::Handcuffs).unwrap();
        let signal = resolve_item(&mut table, Seat::Opponent, ItemKind::Adrenaline, &mut rng, &mut events);
        assert_eq!(signal, Some(TurnResult::SkipOpponentTurn));
        assert!(events.contains(&GameEvent::HandcuffsApplied {
            target: Seat::Player
        }));
    }

    #[test]
    fn test_adrenaline_removes_exactly_one() {
        let (mut table, mut rng, mut events) = setup(vec![Live, Blank]);
        table.opponent.items.add(ItemKind::DivineWaiver).unwrap();
        table.opponent.items.add(ItemKind::DivineWaiver).unwrap();
        resolve_item(&mut table, Seat::Player, ItemKind::Adrenaline, &mut rng, &mut events);
        assert_eq!(table.opponent.items.len(), 1);
    }

    #[test]
    fn test_stolen_adrenaline_does_not_chain() {
        let (mut table, mut rng, mut events) = setup(vec![Live]);
        table.opponent.items.add(ItemKind::Adrenaline).unwrap();
        table.player.items.add(ItemKind::Cigarettes).unwrap();
        resolve_item(&mut table, Seat::Player, ItemKind::Adrenaline, &mut rng, &mut events);
        assert!(table.opponent.items.is_empty());
        assert_eq!(table.player.items.items(), &[ItemKind::Cigarettes]);
        assert!(events.contains(&GameEvent::ItemFizzled {
            seat: Seat::Player,
            item: ItemKind::Adrenaline,
            reason: FizzleReason::ChainedAdrenaline,
        }));
    }

    #[test]
    fn test_expired_medicine_outcomes() {
        let mut gained = false;
        let mut lost = false;
        for seed in 0..40 {
            let (mut table, _, mut events) = setup(vec![]);
            let mut rng = StdRng::seed_from_u64(seed);
            resolve_item(&mut table, Seat::Player, ItemKind::ExpiredMedicine, &mut rng, &mut events);
            match table.player.lives {
                5 => gained = true,
                2 => lost = true,
                other => panic!("unexpected lives {}", other),
            }
        }
        assert!(gained && lost);
    }
}
