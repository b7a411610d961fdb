// Centralized Protocol Constants

// Ticket Format
// =============

/// Number of ASCII digits in a valid ticket. Tickets are opaque to the
/// program beyond this format check.
pub const TICKET_LENGTH: usize = 12;

// Prize Split (basis points)
// ==========================

/// First prize share of the pot. 6000 bps = 60%.
pub const FIRST_PRIZE_BPS: u64 = 6_000;

/// Second prize share of the pot. 2500 bps = 25%.
pub const SECOND_PRIZE_BPS: u64 = 2_500;

/// Third prize share of the pot. 1500 bps = 15%.
pub const THIRD_PRIZE_BPS: u64 = 1_500;

/// Basis point denominator. Tier math floors; the remainder stays in the vault.
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Number of prize tiers paid out per round. A winner-count fulfillment must
/// report exactly this many winners.
pub const PRIZE_TIER_COUNT: usize = 3;

// Time & Slots Logic Constants
// ============================

/// Timeout in slots before the authority may reissue a pending oracle request.
/// If the oracle has not fulfilled by (created_slot + this_timeout), the
/// authority can trigger 'retry_oracle_request' to abandon the stale request.
///
/// 750 slots ~ 5 minutes (@ 0.4s/slot).
/// Setting this low for Devnet testing agility. For Mainnet, consider 1500+.
pub const REQUEST_TIMEOUT_SLOTS: u64 = 750;

/// Initial version for account structures.
pub const INITIAL_VERSION: u16 = 1;
