//! Shared fixtures for tests across the grishex crates
//!
//!     [SAMPLE_CONTRACT] is the reference document used by the lexer, CLI and language server
//!     tests. Its layout is load-bearing: tests assert exact line numbers for folds and
//!     markers, so edit it together with them.
//!
//!     Line map (zero-based):
//!         0       `// region Token`          region opens
//!         1..=3   doc block comment
//!         4..=34  `contract SimpleToken { ... }`
//!         17      `// #region transfers`     nested region opens
//!         27      `// #endregion`
//!         35      `// endregion`

use crate::token::{Token, TokenKind};

pub const SAMPLE_CONTRACT: &str = r#"// region Token
/*
 * Minimal fungible token.
 */
contract SimpleToken {
    state {
        name: string;
        total_supply: uint;
        balances: map<address, uint>;
    }

    constructor(name: string, initial_supply: uint) {
        self.name = name;
        total_supply = initial_supply;
        balances[msg.sender] = initial_supply;
    }

    // #region transfers
    function transfer(to: address, amount: uint) returns bool {
        require(balances[msg.sender] >= amount, "Insufficient balance");

        balances[msg.sender] -= amount;
        balances[to] += amount;

        emit Transfer(msg.sender, to, amount);
        return true;
    }
    // #endregion

    view function balance_of(account: address) returns uint {
        return balances[account];
    }

    event Transfer(from: address, to: address, amount: uint);
}
// endregion
"#;

/// Strips positions, keeping `(kind, lexeme)` for every non-whitespace token.
pub fn significant(tokens: &[Token]) -> Vec<(TokenKind, &str)> {
    tokens
        .iter()
        .filter(|token| token.kind != TokenKind::Whitespace)
        .map(|token| (token.kind, token.lexeme.as_str()))
        .collect()
}

/// Renders one token per line as `Kind "lexeme" start..end`, whitespace included.
pub fn dump(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|token| {
            format!(
                "{} {:?} {}..{}",
                token.kind, token.lexeme, token.start, token.end
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
