// programs/ticket_lottery/src/contexts.rs

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::state::{Lottery, OracleRequest};

#[derive(Accounts)]
pub struct InitializeLottery<'info> {
    #[account(
        init,
        payer = authority,
        space = 8 + Lottery::INIT_SPACE,
        seeds = [crate::LOTTERY_SEED],
        bump
    )]
    pub lottery: Box<Account<'info, Lottery>>,

    /// CHECK: system-owned vault PDA, holds lamports, no data
    #[account(
        init,
        payer = authority,
        space = 0,
        owner = anchor_lang::solana_program::system_program::ID,
        seeds = [crate::VAULT_SEED],
        bump
    )]
    pub vault: UncheckedAccount<'info>,

    pub fee_mint: Account<'info, Mint>,

    #[account(
        init,
        payer = authority,
        seeds = [crate::FEE_VAULT_SEED],
        bump,
        token::mint = fee_mint,
        token::authority = lottery
    )]
    pub fee_vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[derive(Accounts)]
pub struct SetOracleAuthority<'info> {
    #[account(
        mut,
        seeds = [crate::LOTTERY_SEED],
        bump = lottery.bump
    )]
    pub lottery: Box<Account<'info, Lottery>>,

    pub authority: Signer<'info>,
}

#[derive(Accounts)]
pub struct StartLottery<'info> {
    #[account(
        mut,
        seeds = [crate::LOTTERY_SEED],
        bump = lottery.bump
    )]
    pub lottery: Box<Account<'info, Lottery>>,

    pub authority: Signer<'info>,
}

#[derive(Accounts)]
pub struct EnterLottery<'info> {
    #[account(
        mut,
        seeds = [crate::LOTTERY_SEED],
        bump = lottery.bump
    )]
    pub lottery: Box<Account<'info, Lottery>>,

    /// CHECK: System-owned PDA used only as a lamport vault. Address is enforced by seeds/bump.
    #[account(
        mut,
        seeds = [crate::VAULT_SEED],
        bump = lottery.vault_bump
    )]
    pub vault: UncheckedAccount<'info>,

    #[account(mut)]
    pub player: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct FundLottery<'info> {
    #[account(
        mut,
        seeds = [crate::LOTTERY_SEED],
        bump = lottery.bump
    )]
    pub lottery: Box<Account<'info, Lottery>>,

    /// CHECK: System-owned PDA used only as a lamport vault. Address is enforced by seeds/bump.
    #[account(
        mut,
        seeds = [crate::VAULT_SEED],
        bump = lottery.vault_bump
    )]
    pub vault: UncheckedAccount<'info>,

    #[account(mut)]
    pub funder: Signer<'info>,

    pub system_program: Program<'info, System>,
}

// Read-only format check, touches no accounts.
#[derive(Accounts)]
pub struct ValidateTicket {}

#[derive(Accounts)]
pub struct EndLottery<'info> {
    #[account(
        mut,
        seeds = [crate::LOTTERY_SEED],
        bump = lottery.bump
    )]
    pub lottery: Box<Account<'info, Lottery>>,

    #[account(
        init,
        payer = authority,
        space = 8 + OracleRequest::INIT_SPACE,
        seeds = [
            crate::ORACLE_REQUEST_SEED,
            lottery.key().as_ref(),
            lottery.request_nonce.to_le_bytes().as_ref(),
        ],
        bump
    )]
    pub oracle_request: Account<'info, OracleRequest>,

    #[account(
        mut,
        seeds = [crate::FEE_VAULT_SEED],
        bump = lottery.fee_vault_bump,
        token::mint = lottery.fee_mint,
        token::authority = lottery
    )]
    pub fee_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = oracle_fee_account.mint == lottery.fee_mint
    )]
    pub oracle_fee_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

// ----------------------------
// Oracle fulfillment
// ----------------------------

#[derive(Accounts)]
pub struct FulfillNumberOfWinners<'info> {
    #[account(
        mut,
        seeds = [crate::LOTTERY_SEED],
        bump = lottery.bump
    )]
    pub lottery: Box<Account<'info, Lottery>>,

    #[account(
        mut,
        seeds = [
            crate::ORACLE_REQUEST_SEED,
            lottery.key().as_ref(),
            oracle_request.nonce.to_le_bytes().as_ref(),
        ],
        bump = oracle_request.bump,
        close = authority
    )]
    pub oracle_request: Account<'info, OracleRequest>,

    #[account(
        init,
        payer = oracle,
        space = 8 + OracleRequest::INIT_SPACE,
        seeds = [
            crate::ORACLE_REQUEST_SEED,
            lottery.key().as_ref(),
            lottery.request_nonce.to_le_bytes().as_ref(),
        ],
        bump
    )]
    pub next_request: Account<'info, OracleRequest>,

    /// CHECK: lottery authority, receives the closed request account's rent
    #[account(mut, address = lottery.authority)]
    pub authority: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [crate::FEE_VAULT_SEED],
        bump = lottery.fee_vault_bump,
        token::mint = lottery.fee_mint,
        token::authority = lottery
    )]
    pub fee_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = oracle_fee_account.mint == lottery.fee_mint
    )]
    pub oracle_fee_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub oracle: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct FulfillWinners<'info> {
    #[account(
        mut,
        seeds = [crate::LOTTERY_SEED],
        bump = lottery.bump
    )]
    pub lottery: Box<Account<'info, Lottery>>,

    #[account(
        mut,
        seeds = [
            crate::ORACLE_REQUEST_SEED,
            lottery.key().as_ref(),
            oracle_request.nonce.to_le_bytes().as_ref(),
        ],
        bump = oracle_request.bump,
        close = authority
    )]
    pub oracle_request: Account<'info, OracleRequest>,

    /// CHECK: lottery authority, receives the closed request account's rent
    #[account(mut, address = lottery.authority)]
    pub authority: UncheckedAccount<'info>,

    /// CHECK: System-owned PDA used only as a lamport vault. Address is enforced by seeds/bump.
    #[account(
        mut,
        seeds = [crate::VAULT_SEED],
        bump = lottery.vault_bump
    )]
    pub vault: UncheckedAccount<'info>,

    /// CHECK: winner wallet, validated against the stored player list in the handler
    #[account(mut)]
    pub first_winner: UncheckedAccount<'info>,

    /// CHECK: winner wallet, validated against the stored player list in the handler
    #[account(mut)]
    pub second_winner: UncheckedAccount<'info>,

    /// CHECK: winner wallet, validated against the stored player list in the handler
    #[account(mut)]
    pub third_winner: UncheckedAccount<'info>,

    pub oracle: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct RetryOracleRequest<'info> {
    #[account(
        mut,
        seeds = [crate::LOTTERY_SEED],
        bump = lottery.bump
    )]
    pub lottery: Box<Account<'info, Lottery>>,

    #[account(
        mut,
        seeds = [
            crate::ORACLE_REQUEST_SEED,
            lottery.key().as_ref(),
            oracle_request.nonce.to_le_bytes().as_ref(),
        ],
        bump = oracle_request.bump,
        close = authority
    )]
    pub oracle_request: Account<'info, OracleRequest>,

    #[account(
        init,
        payer = authority,
        space = 8 + OracleRequest::INIT_SPACE,
        seeds = [
            crate::ORACLE_REQUEST_SEED,
            lottery.key().as_ref(),
            lottery.request_nonce.to_le_bytes().as_ref(),
        ],
        bump
    )]
    pub next_request: Account<'info, OracleRequest>,

    #[account(
        mut,
        seeds = [crate::FEE_VAULT_SEED],
        bump = lottery.fee_vault_bump,
        token::mint = lottery.fee_mint,
        token::authority = lottery
    )]
    pub fee_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = oracle_fee_account.mint == lottery.fee_mint
    )]
    pub oracle_fee_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}
