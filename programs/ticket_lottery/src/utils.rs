use anchor_lang::prelude::*;
use solana_sha256_hasher::hashv;

use crate::constants::*;
use crate::{
    errors::LotteryError,
    state::{Lottery, LotteryState, OracleRequest, Player, RequestKind},
};

// -----------------
// Seeds / constants
// -----------------
pub const LOTTERY_SEED: &[u8] = b"lottery_v1";
pub const VAULT_SEED: &[u8] = b"vault_v1";
pub const FEE_VAULT_SEED: &[u8] = b"fee_vault_v1";
pub const ORACLE_REQUEST_SEED: &[u8] = b"oracle_request_v1";

pub const MAX_PLAYERS: usize = 100;

// -------------------------
// Ticket format
// -------------------------
pub fn validate_ticket(ticket: &str) -> bool {
    ticket.len() == TICKET_LENGTH && ticket.bytes().all(|b| b.is_ascii_digit())
}


// -------------------------
// Prize tier math
// -------------------------
pub fn prize_tiers(balance: u64) -> Result<(u64, u64, u64)> {
    let first = balance
        .checked_mul(FIRST_PRIZE_BPS)
        .ok_or(LotteryError::MathOverflow)?
        .checked_div(BPS_DENOMINATOR)
        .ok_or(LotteryError::MathOverflow)?;
    let second = balance
        .checked_mul(SECOND_PRIZE_BPS)
        .ok_or(LotteryError::MathOverflow)?
        .checked_div(BPS_DENOMINATOR)
        .ok_or(LotteryError::MathOverflow)?;
    let third = balance
        .checked_mul(THIRD_PRIZE_BPS)
        .ok_or(LotteryError::MathOverflow)?
        .checked_div(BPS_DENOMINATOR)
        .ok_or(LotteryError::MathOverflow)?;

    Ok((first, second, third))
}

// -------------------------
// Request id derivation
// -------------------------
pub fn derive_request_id(
    lottery: &Pubkey,
    round: u64,
    nonce: u64,
    kind: u8,
    job: &[u8; 32],
) -> [u8; 32] {
    let h = hashv(&[
        b"oracle_request".as_ref(),
        lottery.as_ref(),
        round.to_le_bytes().as_ref(),
        nonce.to_le_bytes().as_ref(),
        &[kind],
        job.as_ref(),
    ]);
    h.to_bytes()
}

/// Fields the handler copies into a freshly issued OracleRequest account.
pub struct IssuedRequest {
    pub request_id: [u8; 32],
    pub job: [u8; 32],
    pub nonce: u64,
    pub param_count: u8,
}

// -------------------------
// State machine cores
// -------------------------
pub fn start_core(lottery: &mut Lottery, caller: Pubkey) -> Result<()> {
    require_keys_eq!(lottery.authority, caller, LotteryError::Unauthorized);
    require!(
        lottery.state == LotteryState::Closed as u8,
        LotteryError::InvalidTransition
    );

    lottery.round = lottery
        .round
        .checked_add(1)
        .ok_or(LotteryError::MathOverflow)?;
    lottery.state = LotteryState::Open as u8;

    Ok(())
}

pub fn enter_core(
    lottery: &mut Lottery,
    player: Pubkey,
    ticket: String,
    payment: u64,
) -> Result<u32> {
    require!(
        lottery.state == LotteryState::Open as u8,
        LotteryError::InvalidTransition
    );
    require!(validate_ticket(&ticket), LotteryError::InvalidTicket);
    require!(
        payment == lottery.ticket_price,
        LotteryError::WrongPaymentAmount
    );
    require!(
        lottery.players.len() < MAX_PLAYERS,
        LotteryError::PlayerListFull
    );

    let entry_index = lottery.players.len() as u32;
    lottery.players.push(Player {
        account: player,
        ticket,
    });
    lottery.pot_balance = lottery
        .pot_balance
        .checked_add(payment)
        .ok_or(LotteryError::MathOverflow)?;

    Ok(entry_index)
}

// No state or caller restriction: every deposit joins the pool.
pub fn fund_core(lottery: &mut Lottery, amount: u64) -> Result<()> {
    lottery.pot_balance = lottery
        .pot_balance
        .checked_add(amount)
        .ok_or(LotteryError::MathOverflow)?;
    Ok(())
}

pub fn end_core(lottery: &mut Lottery, caller: Pubkey) -> Result<()> {
    require_keys_eq!(lottery.authority, caller, LotteryError::Unauthorized);
    require!(
        lottery.state == LotteryState::Open as u8,
        LotteryError::InvalidTransition
    );
    // An empty round has no in-bounds winner indices to settle with.
    require!(!lottery.players.is_empty(), LotteryError::NoPlayers);

    lottery.state = LotteryState::Settling as u8;

    Ok(())
}

// -------------------------
// Oracle request cores
// -------------------------
pub fn issue_request_core(
    lottery: &mut Lottery,
    lottery_key: Pubkey,
    request_key: Pubkey,
    kind: RequestKind,
) -> Result<IssuedRequest> {
    require!(
        lottery.state == LotteryState::Settling as u8,
        LotteryError::InvalidTransition
    );
    require!(
        lottery.pending_request == Pubkey::default(),
        LotteryError::RequestAlreadyPending
    );

    let (job, param_count) = match kind {
        RequestKind::WinnerCount => (lottery.winner_count_job, 0),
        RequestKind::WinnerSelection => (lottery.winner_selection_job, lottery.winner_count),
    };

    let nonce = lottery.request_nonce;
    let request_id = derive_request_id(&lottery_key, lottery.round, nonce, kind as u8, &job);

    lottery.pending_request = request_key;
    lottery.request_nonce = nonce.checked_add(1).ok_or(LotteryError::MathOverflow)?;

    Ok(IssuedRequest {
        request_id,
        job,
        nonce,
        param_count,
    })
}

pub fn match_pending_request(
    lottery: &Lottery,
    request: &OracleRequest,
    request_key: Pubkey,
    request_id: [u8; 32],
    kind: RequestKind,
) -> Result<()> {
    require!(
        lottery.pending_request != Pubkey::default(),
        LotteryError::UnknownRequest
    );
    require_keys_eq!(
        lottery.pending_request,
        request_key,
        LotteryError::UnknownRequest
    );
    require!(request.request_id == request_id, LotteryError::UnknownRequest);
    require!(request.kind == kind as u8, LotteryError::UnknownRequest);

    Ok(())
}

pub fn accept_winner_count(
    lottery: &mut Lottery,
    request: &OracleRequest,
    request_key: Pubkey,
    request_id: [u8; 32],
    count: u8,
) -> Result<()> {
    match_pending_request(
        lottery,
        request,
        request_key,
        request_id,
        RequestKind::WinnerCount,
    )?;
    // A count the three-tier payout cannot honor is rejected; the request
    // stays pending.
    require!(
        count as usize == PRIZE_TIER_COUNT,
        LotteryError::InvalidWinnerSet
    );

    lottery.winner_count = count;
    lottery.pending_request = Pubkey::default();

    Ok(())
}

pub fn accept_winners(
    lottery: &Lottery,
    request: &OracleRequest,
    request_key: Pubkey,
    request_id: [u8; 32],
    winner_indices: &[u32],
) -> Result<Vec<Pubkey>> {
    match_pending_request(
        lottery,
        request,
        request_key,
        request_id,
        RequestKind::WinnerSelection,
    )?;
    require!(
        winner_indices.len() == request.param_count as usize,
        LotteryError::InvalidWinnerSet
    );
    require!(
        winner_indices.len() == PRIZE_TIER_COUNT,
        LotteryError::InvalidWinnerSet
    );

    // Bounds are the only index validation; duplicate indices are allowed.
    let mut winners = Vec::with_capacity(winner_indices.len());
    for &index in winner_indices {
        let player = lottery
            .players
            .get(index as usize)
            .ok_or(LotteryError::InvalidWinnerSet)?;
        winners.push(player.account);
    }

    Ok(winners)
}

pub fn settle_core(lottery: &mut Lottery) {
    lottery.players.clear();
    lottery.pot_balance = 0;
    lottery.winner_count = 0;
    lottery.pending_request = Pubkey::default();
    lottery.state = LotteryState::Closed as u8;
}

pub fn retry_core(
    lottery: &mut Lottery,
    caller: Pubkey,
    request: &OracleRequest,
    request_key: Pubkey,
    request_id: [u8; 32],
    current_slot: u64,
) -> Result<RequestKind> {
    require_keys_eq!(lottery.authority, caller, LotteryError::Unauthorized);
    require!(
        lottery.pending_request != Pubkey::default(),
        LotteryError::UnknownRequest
    );
    require_keys_eq!(
        lottery.pending_request,
        request_key,
        LotteryError::UnknownRequest
    );
    require!(request.request_id == request_id, LotteryError::UnknownRequest);

    require!(
        current_slot > request.created_slot.saturating_add(REQUEST_TIMEOUT_SLOTS),
        LotteryError::RetryTooEarly
    );

    let kind = RequestKind::from_u8(request.kind).ok_or(LotteryError::UnknownRequest)?;

    lottery.pending_request = Pubkey::default();

    Ok(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICKET_PRICE: u64 = 50_000_000;

    fn make_lottery() -> Lottery {
        Lottery {
            authority: Pubkey::new_unique(),
            bump: 255,
            oracle_authority: Pubkey::new_unique(),
            vault: Pubkey::new_unique(),
            vault_bump: 254,
            fee_mint: Pubkey::new_unique(),
            fee_vault: Pubkey::new_unique(),
            fee_vault_bump: 253,
            oracle_fee: 0,
            winner_count_job: [7u8; 32],
            winner_selection_job: [9u8; 32],
            state: LotteryState::Closed as u8,
            ticket_price: TICKET_PRICE,
            pot_balance: 0,
            round: 0,
            players: Vec::new(),
            request_nonce: 0,
            pending_request: Pubkey::default(),
            winner_count: 0,
            version: INITIAL_VERSION,
        }
    }

    fn open_with_players(count: usize) -> (Lottery, Vec<Pubkey>) {
        let mut lottery = make_lottery();
        let authority = lottery.authority;
        start_core(&mut lottery, authority).unwrap();

        let mut players = Vec::new();
        for i in 0..count {
            let player = Pubkey::new_unique();
            let ticket = format!("0102032517{:02}", i % 100);
            enter_core(&mut lottery, player, ticket, TICKET_PRICE).unwrap();
            players.push(player);
        }
        (lottery, players)
    }

    /// Mirrors what the issuing handlers persist into the request account.
    fn issue_request(
        lottery: &mut Lottery,
        lottery_key: Pubkey,
        request_key: Pubkey,
        kind: RequestKind,
    ) -> OracleRequest {
        let issued = issue_request_core(lottery, lottery_key, request_key, kind).unwrap();
        OracleRequest {
            lottery: lottery_key,
            bump: 250,
            request_id: issued.request_id,
            kind: kind as u8,
            job: issued.job,
            param_count: issued.param_count,
            nonce: issued.nonce,
            created_slot: 1_000,
        }
    }

    #[test]
    fn prize_tiers_split_ten_sol_sixty_twenty_five_fifteen() {
        let (first, second, third) = prize_tiers(10_000_000_000).unwrap();
        assert_eq!(first, 6_000_000_000);
        assert_eq!(second, 2_500_000_000);
        assert_eq!(third, 1_500_000_000);
    }

    #[test]
    fn prize_tiers_floor_and_leave_dust() {
        let (first, second, third) = prize_tiers(7).unwrap();
        assert_eq!((first, second, third), (4, 1, 1));
        assert!(first + second + third <= 7);

        assert_eq!(prize_tiers(0).unwrap(), (0, 0, 0));
    }

    #[test]
    fn prize_tiers_propagate_overflow() {
        assert!(prize_tiers(u64::MAX).is_err());
    }

    #[test]
    fn request_ids_are_deterministic_and_distinct() {
        let lottery_key = Pubkey::new_unique();
        let job = [3u8; 32];

        let a = derive_request_id(&lottery_key, 1, 0, RequestKind::WinnerCount as u8, &job);
        let b = derive_request_id(&lottery_key, 1, 0, RequestKind::WinnerCount as u8, &job);
        assert_eq!(a, b);

        let other_nonce = derive_request_id(&lottery_key, 1, 1, RequestKind::WinnerCount as u8, &job);
        let other_kind =
            derive_request_id(&lottery_key, 1, 0, RequestKind::WinnerSelection as u8, &job);
        let other_round = derive_request_id(&lottery_key, 2, 0, RequestKind::WinnerCount as u8, &job);
        assert_ne!(a, other_nonce);
        assert_ne!(a, other_kind);
        assert_ne!(a, other_round);
    }

    #[test]
    fn start_requires_authority() {
        let mut lottery = make_lottery();
        let stranger = Pubkey::new_unique();

        assert_eq!(
            start_core(&mut lottery, stranger),
            Err(error!(LotteryError::Unauthorized))
        );
        assert_eq!(lottery.state, LotteryState::Closed as u8);
        assert_eq!(lottery.round, 0);
    }

    #[test]
    fn start_requires_closed_state() {
        let mut lottery = make_lottery();
        let authority = lottery.authority;

        start_core(&mut lottery, authority).unwrap();
        assert_eq!(lottery.state, LotteryState::Open as u8);
        assert_eq!(lottery.round, 1);

        assert_eq!(
            start_core(&mut lottery, authority),
            Err(error!(LotteryError::InvalidTransition))
        );
    }

    #[test]
    fn enter_requires_open_state() {
        let mut lottery = make_lottery();
        let player = Pubkey::new_unique();

        assert_eq!(
            enter_core(&mut lottery, player, "010203251731".to_string(), TICKET_PRICE),
            Err(error!(LotteryError::InvalidTransition))
        );
    }

    #[test]
    fn enter_rejects_invalid_ticket_without_mutating() {
        let (mut lottery, _) = open_with_players(0);
        let player = Pubkey::new_unique();

        assert_eq!(
            enter_core(&mut lottery, player, "123-1235-54".to_string(), TICKET_PRICE),
            Err(error!(LotteryError::InvalidTicket))
        );
        assert!(lottery.players.is_empty());
        assert_eq!(lottery.pot_balance, 0);
    }

    #[test]
    fn enter_rejects_wrong_payment() {
        let (mut lottery, _) = open_with_players(0);
        let player = Pubkey::new_unique();
        let ticket = "010203251731".to_string();

        assert_eq!(
            enter_core(&mut lottery, player, ticket.clone(), TICKET_PRICE - 1),
            Err(error!(LotteryError::WrongPaymentAmount))
        );
        assert_eq!(
            enter_core(&mut lottery, player, ticket, TICKET_PRICE + 1),
            Err(error!(LotteryError::WrongPaymentAmount))
        );
        assert!(lottery.players.is_empty());
    }

    #[test]
    fn enter_assigns_sequential_indices_and_allows_duplicates() {
        let (mut lottery, _) = open_with_players(0);
        let player = Pubkey::new_unique();
        let ticket = "010203251731".to_string();

        let first = enter_core(&mut lottery, player, ticket.clone(), TICKET_PRICE).unwrap();
        let second = enter_core(&mut lottery, player, ticket, TICKET_PRICE).unwrap();

        assert_eq!(first, 0);
        assert_eq!(second, 1);
        assert_eq!(lottery.players.len(), 2);
        assert_eq!(lottery.players[0].account, player);
        assert_eq!(lottery.players[1].account, player);
        assert_eq!(lottery.pot_balance, 2 * TICKET_PRICE);
    }

    #[test]
    fn enter_caps_player_list() {
        let (mut lottery, _) = open_with_players(MAX_PLAYERS);
        let player = Pubkey::new_unique();

        assert_eq!(
            enter_core(&mut lottery, player, "010203251731".to_string(), TICKET_PRICE),
            Err(error!(LotteryError::PlayerListFull))
        );
    }

    #[test]
    fn fund_is_ungated_in_every_state() {
        let mut lottery = make_lottery();
        let authority = lottery.authority;

        fund_core(&mut lottery, 5).unwrap();
        assert_eq!(lottery.state, LotteryState::Closed as u8);

        start_core(&mut lottery, authority).unwrap();
        fund_core(&mut lottery, 10).unwrap();

        let player = Pubkey::new_unique();
        enter_core(&mut lottery, player, "010203251731".to_string(), TICKET_PRICE).unwrap();
        end_core(&mut lottery, authority).unwrap();
        fund_core(&mut lottery, 20).unwrap();

        assert_eq!(lottery.pot_balance, 35 + TICKET_PRICE);
    }

    #[test]
    fn fund_propagates_overflow() {
        let mut lottery = make_lottery();
        lottery.pot_balance = u64::MAX;

        assert_eq!(
            fund_core(&mut lottery, 1),
            Err(error!(LotteryError::MathOverflow))
        );
    }

    #[test]
    fn end_requires_authority_open_state_and_players() {
        let (mut lottery, _) = open_with_players(1);
        let authority = lottery.authority;
        let stranger = Pubkey::new_unique();

        assert_eq!(
            end_core(&mut lottery, stranger),
            Err(error!(LotteryError::Unauthorized))
        );

        end_core(&mut lottery, authority).unwrap();
        assert_eq!(lottery.state, LotteryState::Settling as u8);
        assert_eq!(
            end_core(&mut lottery, authority),
            Err(error!(LotteryError::InvalidTransition))
        );

        let mut empty = make_lottery();
        let empty_authority = empty.authority;
        start_core(&mut empty, empty_authority).unwrap();
        assert_eq!(
            end_core(&mut empty, empty_authority),
            Err(error!(LotteryError::NoPlayers))
        );
    }

    #[test]
    fn issue_request_requires_settling_without_pending() {
        let (mut lottery, _) = open_with_players(1);
        let lottery_key = Pubkey::new_unique();

        let res = issue_request_core(
            &mut lottery,
            lottery_key,
            Pubkey::new_unique(),
            RequestKind::WinnerCount,
        );
        assert_eq!(res.err(), Some(error!(LotteryError::InvalidTransition)));

        let authority = lottery.authority;
        end_core(&mut lottery, authority).unwrap();

        let first_key = Pubkey::new_unique();
        let issued =
            issue_request_core(&mut lottery, lottery_key, first_key, RequestKind::WinnerCount)
                .unwrap();
        assert_eq!(issued.nonce, 0);
        assert_eq!(issued.param_count, 0);
        assert_eq!(issued.job, lottery.winner_count_job);
        assert_eq!(lottery.pending_request, first_key);
        assert_eq!(lottery.request_nonce, 1);

        let res = issue_request_core(
            &mut lottery,
            lottery_key,
            Pubkey::new_unique(),
            RequestKind::WinnerCount,
        );
        assert_eq!(res.err(), Some(error!(LotteryError::RequestAlreadyPending)));
    }

    #[test]
    fn winner_count_fulfillment_matches_pending_request() {
        let (mut lottery, _) = open_with_players(3);
        let authority = lottery.authority;
        end_core(&mut lottery, authority).unwrap();

        let lottery_key = Pubkey::new_unique();
        let request_key = Pubkey::new_unique();
        let request = issue_request(&mut lottery, lottery_key, request_key, RequestKind::WinnerCount);

        assert_eq!(
            accept_winner_count(&mut lottery, &request, request_key, [0u8; 32], 3),
            Err(error!(LotteryError::UnknownRequest))
        );
        assert_eq!(
            accept_winner_count(
                &mut lottery,
                &request,
                Pubkey::new_unique(),
                request.request_id,
                3
            ),
            Err(error!(LotteryError::UnknownRequest))
        );

        let mut tampered = request.clone();
        tampered.kind = RequestKind::WinnerSelection as u8;
        assert_eq!(
            accept_winner_count(&mut lottery, &tampered, request_key, tampered.request_id, 3),
            Err(error!(LotteryError::UnknownRequest))
        );

        assert_eq!(
            accept_winner_count(&mut lottery, &request, request_key, request.request_id, 2),
            Err(error!(LotteryError::InvalidWinnerSet))
        );
        assert_eq!(lottery.pending_request, request_key);

        accept_winner_count(&mut lottery, &request, request_key, request.request_id, 3).unwrap();
        assert_eq!(lottery.winner_count, 3);
        assert_eq!(lottery.pending_request, Pubkey::default());
    }

    #[test]
    fn fulfillment_without_pending_request_is_unknown() {
        let mut lottery = make_lottery();
        let request = OracleRequest {
            lottery: Pubkey::new_unique(),
            bump: 250,
            request_id: [1u8; 32],
            kind: RequestKind::WinnerCount as u8,
            job: [7u8; 32],
            param_count: 0,
            nonce: 0,
            created_slot: 0,
        };
        let request_key = Pubkey::new_unique();

        assert_eq!(
            accept_winner_count(&mut lottery, &request, request_key, request.request_id, 3),
            Err(error!(LotteryError::UnknownRequest))
        );

        let authority = lottery.authority;
        start_core(&mut lottery, authority).unwrap();
        assert_eq!(
            accept_winner_count(&mut lottery, &request, request_key, request.request_id, 3),
            Err(error!(LotteryError::UnknownRequest))
        );
    }

    #[test]
    fn winner_fulfillment_validates_set_and_bounds() {
        let (mut lottery, players) = open_with_players(5);
        let authority = lottery.authority;
        end_core(&mut lottery, authority).unwrap();

        let lottery_key = Pubkey::new_unique();
        let count_key = Pubkey::new_unique();
        let count_request =
            issue_request(&mut lottery, lottery_key, count_key, RequestKind::WinnerCount);
        accept_winner_count(
            &mut lottery,
            &count_request,
            count_key,
            count_request.request_id,
            3,
        )
        .unwrap();

        let select_key = Pubkey::new_unique();
        let select_request = issue_request(
            &mut lottery,
            lottery_key,
            select_key,
            RequestKind::WinnerSelection,
        );
        assert_eq!(select_request.param_count, 3);

        assert_eq!(
            accept_winners(
                &lottery,
                &select_request,
                select_key,
                select_request.request_id,
                &[0, 1]
            ),
            Err(error!(LotteryError::InvalidWinnerSet))
        );
        assert_eq!(
            accept_winners(
                &lottery,
                &select_request,
                select_key,
                select_request.request_id,
                &[0, 1, 2, 3]
            ),
            Err(error!(LotteryError::InvalidWinnerSet))
        );
        assert_eq!(
            accept_winners(
                &lottery,
                &select_request,
                select_key,
                select_request.request_id,
                &[0, 1, 5]
            ),
            Err(error!(LotteryError::InvalidWinnerSet))
        );

        let winners = accept_winners(
            &lottery,
            &select_request,
            select_key,
            select_request.request_id,
            &[2, 0, 1],
        )
        .unwrap();
        assert_eq!(winners, vec![players[2], players[0], players[1]]);

        let duplicated = accept_winners(
            &lottery,
            &select_request,
            select_key,
            select_request.request_id,
            &[4, 4, 4],
        )
        .unwrap();
        assert_eq!(duplicated, vec![players[4], players[4], players[4]]);
    }

    #[test]
    fn full_round_trip_settles_back_to_closed() {
        let mut lottery = make_lottery();
        let authority = lottery.authority;
        let lottery_key = Pubkey::new_unique();

        start_core(&mut lottery, authority).unwrap();
        assert_eq!(lottery.round, 1);

        let mut players = Vec::new();
        for i in 0..3 {
            let player = Pubkey::new_unique();
            enter_core(&mut lottery, player, format!("01020325173{}", i), TICKET_PRICE).unwrap();
            players.push(player);
        }
        fund_core(&mut lottery, 1_000).unwrap();
        assert_eq!(lottery.pot_balance, 3 * TICKET_PRICE + 1_000);

        end_core(&mut lottery, authority).unwrap();

        let count_key = Pubkey::new_unique();
        let count_request =
            issue_request(&mut lottery, lottery_key, count_key, RequestKind::WinnerCount);
        accept_winner_count(
            &mut lottery,
            &count_request,
            count_key,
            count_request.request_id,
            3,
        )
        .unwrap();

        let select_key = Pubkey::new_unique();
        let select_request = issue_request(
            &mut lottery,
            lottery_key,
            select_key,
            RequestKind::WinnerSelection,
        );
        let winners = accept_winners(
            &lottery,
            &select_request,
            select_key,
            select_request.request_id,
            &[0, 1, 2],
        )
        .unwrap();
        assert_eq!(winners, players);

        let (first, second, third) = prize_tiers(lottery.pot_balance).unwrap();
        assert!(first + second + third <= lottery.pot_balance);

        settle_core(&mut lottery);
        assert_eq!(lottery.state, LotteryState::Closed as u8);
        assert!(lottery.players.is_empty());
        assert_eq!(lottery.pot_balance, 0);
        assert_eq!(lottery.winner_count, 0);
        assert_eq!(lottery.pending_request, Pubkey::default());

        // the machine cycles
        start_core(&mut lottery, authority).unwrap();
        assert_eq!(lottery.round, 2);
        assert_eq!(lottery.state, LotteryState::Open as u8);
    }

    #[test]
    fn settled_request_id_is_no_longer_fulfillable() {
        let (mut lottery, _) = open_with_players(3);
        let authority = lottery.authority;
        end_core(&mut lottery, authority).unwrap();

        let lottery_key = Pubkey::new_unique();
        let count_key = Pubkey::new_unique();
        let count_request =
            issue_request(&mut lottery, lottery_key, count_key, RequestKind::WinnerCount);
        accept_winner_count(
            &mut lottery,
            &count_request,
            count_key,
            count_request.request_id,
            3,
        )
        .unwrap();

        // phase-1 id cannot be replayed once consumed
        assert_eq!(
            accept_winner_count(
                &mut lottery,
                &count_request,
                count_key,
                count_request.request_id,
                3
            ),
            Err(error!(LotteryError::UnknownRequest))
        );
    }

    #[test]
    fn retry_is_gated_by_authority_and_timeout() {
        let (mut lottery, _) = open_with_players(2);
        let authority = lottery.authority;
        end_core(&mut lottery, authority).unwrap();

        let lottery_key = Pubkey::new_unique();
        let request_key = Pubkey::new_unique();
        let request = issue_request(&mut lottery, lottery_key, request_key, RequestKind::WinnerCount);
        let expired_slot = request.created_slot + REQUEST_TIMEOUT_SLOTS + 1;

        assert_eq!(
            retry_core(
                &mut lottery,
                Pubkey::new_unique(),
                &request,
                request_key,
                request.request_id,
                expired_slot
            )
            .err(),
            Some(error!(LotteryError::Unauthorized))
        );

        // boundary slot is still too early
        assert_eq!(
            retry_core(
                &mut lottery,
                authority,
                &request,
                request_key,
                request.request_id,
                request.created_slot + REQUEST_TIMEOUT_SLOTS
            )
            .err(),
            Some(error!(LotteryError::RetryTooEarly))
        );

        assert_eq!(
            retry_core(
                &mut lottery,
                authority,
                &request,
                request_key,
                [9u8; 32],
                expired_slot
            )
            .err(),
            Some(error!(LotteryError::UnknownRequest))
        );

        let kind = retry_core(
            &mut lottery,
            authority,
            &request,
            request_key,
            request.request_id,
            expired_slot,
        )
        .unwrap();
        assert!(kind == RequestKind::WinnerCount);
        assert_eq!(lottery.pending_request, Pubkey::default());

        // reissue under a fresh id; the stale id is dead
        let fresh_key = Pubkey::new_unique();
        let fresh = issue_request(&mut lottery, lottery_key, fresh_key, kind);
        assert_ne!(fresh.request_id, request.request_id);
        assert_eq!(
            accept_winner_count(&mut lottery, &request, request_key, request.request_id, 3),
            Err(error!(LotteryError::UnknownRequest))
        );
        accept_winner_count(&mut lottery, &fresh, fresh_key, fresh.request_id, 3).unwrap();
    }
}
