use anchor_lang::prelude::*;

#[repr(u8)]
pub enum LotteryState {
    Closed = 0,
    Open = 1,
    Settling = 2,
}

#[repr(u8)]
#[derive(Clone, Copy, PartialEq)]
pub enum RequestKind {
    WinnerCount = 0,
    WinnerSelection = 1,
}

impl RequestKind {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(RequestKind::WinnerCount),
            1 => Some(RequestKind::WinnerSelection),
            _ => None,
        }
    }
}

/// One entry in the current round. The same account may enter any number of
/// times, with the same or different tickets.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, InitSpace)]
pub struct Player {
    pub account: Pubkey,
    #[max_len(12)]
    pub ticket: String,
}

#[account]
#[derive(InitSpace)]
pub struct Lottery {
    pub authority: Pubkey,
    pub bump: u8,

    /// Oracle signer allowed to fulfill pending requests.
    pub oracle_authority: Pubkey,

    // System-owned PDA vault (holds lamports, no data)
    pub vault: Pubkey,
    pub vault_bump: u8,

    // Oracle fee plumbing (SPL fee token)
    pub fee_mint: Pubkey,
    pub fee_vault: Pubkey,
    pub fee_vault_bump: u8,
    pub oracle_fee: u64,

    // Oracle job ids for the two request phases
    pub winner_count_job: [u8; 32],
    pub winner_selection_job: [u8; 32],

    pub state: u8,
    pub ticket_price: u64,

    /// Prize pool in lamports, tracked separately from the vault's physical
    /// balance (which also carries rent and payout dust).
    pub pot_balance: u64,

    pub round: u64,

    /// NOTE: fixed max_len to keep account size deterministic.
    #[max_len(100)]
    pub players: Vec<Player>,

    // Pending-request bookkeeping. At most one request is in flight;
    // Pubkey::default() means none.
    pub request_nonce: u64,
    pub pending_request: Pubkey,

    /// Result of the winner-count phase, consumed by winner selection.
    pub winner_count: u8,

    pub version: u16,
}

#[account]
#[derive(InitSpace)]
pub struct OracleRequest {
    pub lottery: Pubkey,
    pub bump: u8,

    /// Correlation id the oracle must echo back on fulfillment.
    pub request_id: [u8; 32],
    pub kind: u8,
    pub job: [u8; 32],

    /// Number of values the fulfillment must carry (0 for winner count).
    pub param_count: u8,

    pub nonce: u64,
    pub created_slot: u64,
}
